// src/client/delete.rs
//
// Deletion always goes through an explicit confirmation step: the UI arms
// the flow with the selected entity, a dialog names it, and only a confirm
// sends the (single) request. The dialog and the selection clear together.

use crate::client::resource::{ResourceClient, Transport};
use crate::client::ClientError;
use serde::de::DeserializeOwned;

#[derive(Debug, Default)]
pub struct DeleteFlow {
    armed: Option<(i64, String)>,
}

impl DeleteFlow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects an entity for deletion; `label` is what the dialog shows.
    pub fn arm(&mut self, id: i64, label: impl Into<String>) {
        self.armed = Some((id, label.into()));
    }

    /// The entity the confirmation dialog is currently naming, if any.
    pub fn armed(&self) -> Option<(i64, &str)> {
        self.armed.as_ref().map(|(id, label)| (*id, label.as_str()))
    }

    /// Dismissing the dialog clears the selection without any request.
    pub fn cancel(&mut self) {
        self.armed = None;
    }

    /// Sends exactly one delete for the armed entity. The selection is
    /// taken before the request so no stale reference survives either way.
    pub fn confirm<T, X>(&mut self, client: &mut ResourceClient<T, X>) -> Result<i64, ClientError>
    where
        T: DeserializeOwned,
        X: Transport,
    {
        let (id, _) = self.armed.take().ok_or(ClientError::NothingSelected)?;
        client.delete_confirmed(id)?;
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::resource::test_support::{shared_registry, FakeTransport};
    use crate::client::resource::ResourceSpec;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Item {
        #[allow(dead_code)]
        id: i64,
    }

    const POSTS: ResourceSpec = ResourceSpec {
        path: "/api/admin/posts",
        dependents: &[],
    };

    fn client() -> ResourceClient<Item, FakeTransport> {
        let transport = FakeTransport::answering(r#"{"success":true,"data":{"deleted":3}}"#);
        ResourceClient::new(POSTS.clone(), transport, shared_registry())
    }

    #[test]
    fn unconfirmed_delete_sends_nothing() {
        let mut client = client();
        let mut flow = DeleteFlow::new();

        flow.arm(3, "تدوينة");
        flow.cancel();

        assert!(matches!(
            flow.confirm(&mut client),
            Err(ClientError::NothingSelected)
        ));
        // Inspecting the transport: no request ever left.
        assert_eq!(client_transport_deletes(&client), 0);
    }

    #[test]
    fn confirm_sends_exactly_one_request_and_clears_selection() {
        let mut client = client();
        let mut flow = DeleteFlow::new();

        flow.arm(3, "تدوينة");
        assert_eq!(flow.armed().unwrap().0, 3);

        let deleted = flow.confirm(&mut client).unwrap();
        assert_eq!(deleted, 3);
        assert_eq!(client_transport_deletes(&client), 1);
        assert!(flow.armed().is_none(), "selection must clear with the dialog");

        // A second confirm without re-arming is a no-op error, not a request.
        assert!(matches!(
            flow.confirm(&mut client),
            Err(ClientError::NothingSelected)
        ));
        assert_eq!(client_transport_deletes(&client), 1);
    }

    #[test]
    fn rearming_targets_the_new_entity_only() {
        let mut client = client();
        let mut flow = DeleteFlow::new();

        flow.arm(3, "أ");
        flow.arm(8, "ب");
        flow.confirm(&mut client).unwrap();

        let (_, path) = client.transport_ref().calls.last().unwrap().clone();
        assert_eq!(path, "/api/admin/posts/8");
    }

    fn client_transport_deletes(client: &ResourceClient<Item, FakeTransport>) -> usize {
        client.transport_ref().requests_for("DELETE")
    }
}
