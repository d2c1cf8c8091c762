//! Input checks run before anything reaches the store.
//!
//! The store accepts any well-typed value; these rules describe what a
//! person may submit.

use labnet_core::{PostDraft, PostKind};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("post content must not be empty")]
    EmptyPost,

    #[error("job offer is missing {0}")]
    MissingJobField(&'static str),

    #[error("comment must not be empty")]
    EmptyComment,

    #[error("message must not be empty")]
    EmptyMessage,
}

fn blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// Plain posts and articles need text. Job offers need a position, a
/// company and a location; their text may be empty.
pub fn post(draft: &PostDraft) -> Result<(), ValidationError> {
    if draft.kind != PostKind::Job {
        if blank(&draft.content) {
            return Err(ValidationError::EmptyPost);
        }
        return Ok(());
    }

    let Some(job) = &draft.job_details else {
        return Err(ValidationError::MissingJobField("position"));
    };
    for (name, value) in [
        ("position", &job.position),
        ("company", &job.company),
        ("location", &job.location),
    ] {
        if blank(value) {
            return Err(ValidationError::MissingJobField(name));
        }
    }
    Ok(())
}

pub fn comment(content: &str) -> Result<(), ValidationError> {
    if blank(content) {
        return Err(ValidationError::EmptyComment);
    }
    Ok(())
}

pub fn message(content: &str) -> Result<(), ValidationError> {
    if blank(content) {
        return Err(ValidationError::EmptyMessage);
    }
    Ok(())
}
