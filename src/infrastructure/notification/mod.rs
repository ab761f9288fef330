mod email_template;
mod smtp_notifier;

pub use email_template::{RenderedEmail, render, strip_code_fence, subject_for, video_thumbnail_url};
pub use smtp_notifier::{SmtpConfig, SmtpNotifier};
