//! Email-to-issue processing pipeline.
//!
//! One inbound event flows through:
//! 1. `ContentLocator` — inline payload or object-storage fetch
//! 2. MIME extraction (`parser`) — raw text → `InboundEmail`
//! 3. `ReplyClassifier` — replies are skipped, nothing else happens
//! 4. `BodySanitizer` — artifact stripping + PII redaction
//! 5. `IssuePublisher` / `ConfirmationNotifier` — injected transports
//!
//! Stages run strictly in order; nothing is persisted between events.

pub mod classifier;
pub mod locator;
pub mod mask;
pub mod parser;
pub mod processor;
pub mod sanitizer;
pub mod types;
