use crate::modules::account::application::ports::incoming::AccountService;
use crate::tests::support::stubs::ScriptedAccountService;
use crate::AppState;
use actix_web::web;
use std::sync::Arc;

pub struct TestAppStateBuilder {
    account_service: Option<Arc<dyn AccountService>>,
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        Self {
            account_service: Some(Arc::new(ScriptedAccountService::succeeding())),
        }
    }
}

impl TestAppStateBuilder {
    pub fn with_account_service(mut self, service: impl AccountService + 'static) -> Self {
        self.account_service = Some(Arc::new(service));
        self
    }

    pub fn build(self) -> web::Data<AppState> {
        web::Data::new(AppState {
            account_service: self.account_service.unwrap(),
        })
    }
}
