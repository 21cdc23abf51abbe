// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of FluxION.
//
// Licensed under the Creative Commons Attribution-NonCommercial-NoDerivatives 4.0 International
// (CC BY-NC-ND 4.0). You may use and share this file for non-commercial purposes only and you may not
// create derivatives. See <https://creativecommons.org/licenses/by-nc-nd/4.0/>.
//
// This software is provided "AS IS", without warranty of any kind.
//
// For commercial licensing, please contact: info@solare.cz

//! Error types for remote calls and the workflows built on them.
//!
//! The `Display` output of every variant is the message shown to the user.

use thiserror::Error;

/// Message shown when the backend could not be reached at all
pub const CONNECTIVITY_MESSAGE: &str = "Failed to fetch data. Is the backend running?";

/// Classified failure of a single remote call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// No response received
    #[error("Failed to fetch data. Is the backend running?")]
    Transport { reason: String },

    /// Non-2xx status. `detail` is the backend's error detail or the status text.
    #[error("{detail}")]
    Server { status: u16, detail: String },

    /// 2xx response whose body does not have the expected shape
    #[error("unexpected response from {path}: {reason}")]
    Decode { path: String, reason: String },

    #[error("client configuration error: {0}")]
    Config(String),
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } => Some(*status),
            Self::Transport { .. } | Self::Decode { .. } | Self::Config(_) => None,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }
}

pub type ClientResult<T> = std::result::Result<T, ClientError>;

/// Failure of the retrain-then-forecast workflow
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    #[error("model retraining failed")]
    Retrain(#[source] ClientError),

    #[error("failed to generate forecast: {0}")]
    Forecast(#[source] ClientError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_user_facing() {
        let transport = ClientError::Transport {
            reason: "connection refused".to_owned(),
        };
        assert_eq!(transport.to_string(), CONNECTIVITY_MESSAGE);

        let server = ClientError::Server {
            status: 404,
            detail: "Location not found: Atlantis".to_owned(),
        };
        assert_eq!(server.to_string(), "Location not found: Atlantis");
        assert_eq!(server.status(), Some(404));
    }

    #[test]
    fn test_pipeline_messages() {
        let cause = ClientError::Server {
            status: 500,
            detail: "Model training failed.".to_owned(),
        };
        assert_eq!(
            PipelineError::Retrain(cause.clone()).to_string(),
            "model retraining failed"
        );
        assert_eq!(
            PipelineError::Forecast(cause).to_string(),
            "failed to generate forecast: Model training failed."
        );
    }
}
