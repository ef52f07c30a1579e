#![allow(dead_code)]

use std::sync::Arc;

use formsmith::generation::backend::MockCompletionBackend;
use formsmith::generation::GenerationOrchestrator;
use formsmith::library::catalog::catalog;
use formsmith::library::profile::LibraryProfile;

pub const EMAIL_BLOCK: &str = r#"<Form.Item label="Email" name="email"><Input /></Form.Item>"#;
pub const PASSWORD_BLOCK: &str = r#"<Form.Item label="Password" name="password"><Input.Password /></Form.Item>"#;
pub const SUBMIT_BLOCK: &str = r#"<Form.Item><Button type="primary" htmlType="submit">Log in</Button></Form.Item>"#;

/// What a completion service typically returns for "login form".
pub fn login_reply() -> String {
    format!(
        "<Form layout=\"vertical\">\n  {}\n  {}\n</Form>",
        EMAIL_BLOCK, PASSWORD_BLOCK
    )
}

/// Every catalog snippet of a profile, one per line.
pub fn catalog_document(profile: LibraryProfile) -> String {
    catalog(profile)
        .iter()
        .map(|e| e.code)
        .collect::<Vec<_>>()
        .join("\n")
}

/// An orchestrator over a shared mock so tests can inspect recorded requests.
pub fn mock_orchestrator(mock: MockCompletionBackend) -> (GenerationOrchestrator, Arc<MockCompletionBackend>) {
    let mock = Arc::new(mock);
    let orchestrator = GenerationOrchestrator::new(Box::new(Arc::clone(&mock)));
    (orchestrator, mock)
}
