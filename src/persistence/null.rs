//! Log-only gateway used when no durable backend is configured.

use crate::contact::submission::Submission;
use crate::persistence::{PersistenceError, PersistenceGateway, StoreReceipt};

const PREVIEW_CHARS: usize = 100;

#[derive(Debug, Clone, Copy, Default)]
pub struct NullGateway;

impl PersistenceGateway for NullGateway {
    async fn store(&self, submission: &Submission) -> Result<StoreReceipt, PersistenceError> {
        tracing::info!(
            name = %submission.name(),
            email = %submission.email(),
            subject = %submission.subject(),
            message = %submission.message_preview(PREVIEW_CHARS),
            "Contact submission received (persistence not configured)"
        );
        Ok(StoreReceipt::Skipped)
    }

    fn is_durable(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contact::submission::SubmissionDraft;
    use crate::contact::validator::validate;

    #[tokio::test]
    async fn skips_storage() {
        let submission = validate(SubmissionDraft {
            name: "Jo".into(),
            email: "jo@x.com".into(),
            subject: "Hello there".into(),
            message: "This is a test message.".into(),
        })
        .unwrap();

        let receipt = NullGateway.store(&submission).await.unwrap();
        assert_eq!(receipt, StoreReceipt::Skipped);
        assert!(!NullGateway.is_durable());
    }
}
