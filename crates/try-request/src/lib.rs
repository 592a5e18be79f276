//! # try-request
//!
//! Try-it-out pipeline for OpenAPI operations.
//! Assembles concrete HTTP requests from operations and user values, renders
//! them as curl snippets, and executes them live with abortable handles.

mod assembler;
mod curl;
mod descriptor;
mod error;
mod executor;

pub use assembler::{ParamValues, RequestAssembler};
pub use curl::{curl_command, shell_quote};
pub use descriptor::{RequestDescriptor, RequestPayload};
pub use error::{AssembleError, AssembleResult};
pub use executor::{ExecutionHandle, RequestExecutor, ResponseData, DEFAULT_TIMEOUT};
