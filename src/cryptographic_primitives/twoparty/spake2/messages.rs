/*
    This file is part of Curv library
    Copyright 2018 by Kzen Networks
    (https://github.com/KZen-networks/curv)
    License MIT: <https://github.com/KZen-networks/curv/blob/master/LICENSE>
*/

//! The three logical messages of a handshake. Framing and transport are up to the caller;
//! byte fields serialize as hex strings.

use serde_derive::{Deserialize, Serialize};

use crate::BigInt;

use super::participant::{Role, SetupParams};

/// Client to server: who is asking, and on which suite
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelloRequest {
    pub identity: String,
    pub suite: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_parameter: Option<BigInt>,
}

/// Server to client: the server's identity and the parameters it agreed to
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelloResponse {
    pub identity: String,
    pub suite: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_parameter: Option<BigInt>,
}

impl HelloRequest {
    pub fn new(identity: impl Into<String>, suite: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            suite: suite.into(),
            group_parameter: None,
        }
    }

    pub fn with_group_parameter(mut self, group_parameter: BigInt) -> Self {
        self.group_parameter = Some(group_parameter);
        self
    }
}

impl HelloResponse {
    /// Responder parameters matching what the server agreed to
    pub fn setup_params(&self, identity: &str, password: &str) -> SetupParams {
        let params = SetupParams::new(
            Role::Responder,
            password,
            identity,
            self.identity.as_str(),
            self.suite.as_str(),
        );
        match &self.group_parameter {
            Some(group_parameter) => params.with_group_parameter(group_parameter.clone()),
            None => params,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicShareMessage {
    #[serde(with = "hex::serde")]
    pub share: Vec<u8>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmationMessage {
    #[serde(with = "hex::serde")]
    pub ciphertext: Vec<u8>,
}
