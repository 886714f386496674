//! Typed, rate-limited client for the MoySklad JSON API.
//!
//! Every call goes through a single [`requester::Requester`]: the resource path is resolved
//! against a fixed base endpoint, the call waits for a slot in the rolling-window rate limit,
//! the fixed JSON headers and one authorization header are attached, and the decoded body is
//! checked for an embedded `errors` list before it reaches the caller.
//!
//! # Feature Flags
//!
//! - `reqwest` (default): blocking reqwest transport behind [`http::HttpClient`].
//! - `tracing`: request spans and throttling/error events.
//! - `metrics`: request outcome and rate-limit delay counters.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod classify;
pub mod config;
pub mod entity;
pub mod error;
pub mod http;
pub mod obs;
pub mod rate_limit;
pub mod requester;
pub mod transport;

mod _prelude {
	pub use std::{
		collections::{BTreeMap, VecDeque},
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
	};

	pub use parking_lot::Mutex;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Error as ReqwestError, blocking::Client as ReqwestClient};
	pub use serde::{Deserialize, Serialize, de::DeserializeOwned};
	pub use serde_json::Value;
	pub use thiserror::Error as ThisError;
	pub use url::Url;
	pub use uuid::Uuid;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};

pub use auth::Credential;
pub use config::{RequesterBuilder, RequesterConfig};
pub use error::{Error, Result};
pub use rate_limit::RateLimit;
pub use requester::Requester;
#[cfg(feature = "reqwest")] pub use requester::ReqwestRequester;
