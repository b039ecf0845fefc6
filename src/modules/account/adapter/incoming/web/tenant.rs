use actix_web::{http::header, HttpRequest};

/// Tenant of a request: the hostname of its `Host` header, port stripped.
/// Empty when the request carries no host.
pub fn tenant_of(req: &HttpRequest) -> String {
    let host = req
        .headers()
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
        .or_else(|| req.uri().host().map(str::to_string))
        .unwrap_or_default();

    hostname(&host)
}

fn hostname(host: &str) -> String {
    let host = host.trim();

    // [::1]:8080
    if let Some(rest) = host.strip_prefix('[') {
        return match rest.split_once(']') {
            Some((address, _)) => address.to_lowercase(),
            None => String::new(),
        };
    }

    host.split(':').next().unwrap_or_default().to_lowercase()
}
