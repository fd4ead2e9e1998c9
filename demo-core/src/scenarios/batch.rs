use super::{CHECK_IF_BLACK, GET_CONTACT_INFO, ScenarioError};
use crate::{
    connection::Connection,
    report::{BatchReport, ContactReport},
    stubs::DemoStub,
};
use demo_proto::pb::demo::CheckIps;
use std::collections::BTreeMap;

/// `CheckIfBlack` (list in, map out) followed by `GetContactInfo` (union reply).
///
/// Fails with [`ScenarioError::IncompleteReply`] when the contact union comes back empty.
pub async fn batch(connection: Connection, request: CheckIps) -> Result<BatchReport, ScenarioError> {
    let mut stub = DemoStub::from_connection(&connection);

    let reply = stub
        .check_if_black(request)
        .await
        .map_err(ScenarioError::call(CHECK_IF_BLACK))?;

    for (ip, is_black) in &reply.results {
        tracing::info!(ip = %ip, is_black = *is_black, "ip checked");
    }

    let blacklist: BTreeMap<String, bool> = reply.results.into_iter().collect();

    let reply = stub
        .get_contact_info()
        .await
        .map_err(ScenarioError::call(GET_CONTACT_INFO))?;

    let contact =
        ContactReport::from_reply(reply).ok_or(ScenarioError::IncompleteReply {
            method: GET_CONTACT_INFO,
            field: "contact",
        })?;

    tracing::info!(tel = ?contact.tel(), cell = ?contact.cell(), "contact info");

    drop(stub);
    connection.close();
    Ok(BatchReport { blacklist, contact })
}
