/*
    This file is part of Curv library
    Copyright 2018 by Kzen Networks
    (https://github.com/KZen-networks/curv)
    License MIT: <https://github.com/KZen-networks/curv/blob/master/LICENSE>
*/

use tracing::info;

use super::credentials::CredentialStore;
use super::error::Spake2Error;
use super::messages::{HelloRequest, HelloResponse};
use super::participant::{Participant, Role, SetupParams};

/// Answers a client's hello: looks up the claimed identity's password and sets up the
/// server's Initiator participant on the requested suite and group parameter.
pub fn accept_hello<C>(
    store: &C,
    server_identity: &str,
    request: &HelloRequest,
) -> Result<(HelloResponse, Participant), Spake2Error>
where
    C: CredentialStore + ?Sized,
{
    info!(identity = %request.identity, suite = %request.suite, "hello");
    let password = store.lookup_password(&request.identity)?;

    let mut params = SetupParams::new(
        Role::Initiator,
        password.as_str(),
        server_identity,
        request.identity.as_str(),
        request.suite.as_str(),
    );
    if let Some(group_parameter) = &request.group_parameter {
        params = params.with_group_parameter(group_parameter.clone());
    }
    let participant = Participant::set_up(&params)?;

    let response = HelloResponse {
        identity: server_identity.to_string(),
        suite: participant.suite().name().to_string(),
        group_parameter: request.group_parameter.clone(),
    };
    Ok((response, participant))
}
