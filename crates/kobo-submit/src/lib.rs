pub mod dispatch;
pub mod document;
pub mod orchestrator;
pub mod xml;

pub use dispatch::{
    DEFAULT_REQUEST_TIMEOUT, DispatchOutcome, DispatchStatus, build_client, dispatch,
};
pub use document::{
    ACKNOWLEDGEMENT, DocumentBuilder, HOUSEHOLD_FIELDS, INDIVIDUAL_FIELDS, InstanceIdSource,
    SubmissionDocument, build_document, build_document_with_date,
};
pub use orchestrator::{BatchOptions, BatchSummary, RowFailure, run_batch};
pub use xml::serialize;
