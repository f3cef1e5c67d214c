use actor_framework::{ActorEntity, FrameworkError, PageRequest, ResourceActor};
use async_trait::async_trait;

// --- Test Entity ---

/// A shelf slot with a caller-chosen code (when given) and a unit count.
#[derive(Clone, Debug, PartialEq)]
struct Slot {
    id: u32,
    aisle: String,
    units: u32,
}

#[derive(Debug)]
struct SlotCreate {
    code: Option<u32>,
    aisle: String,
    units: u32,
}

#[derive(Debug)]
struct SlotUpdate {
    units: i64,
}

#[derive(Debug)]
struct SlotQuery {
    aisle: Option<String>,
}

#[derive(Debug)]
enum SlotAction {
    Take(u32),
}

#[derive(Debug, PartialEq, thiserror::Error)]
enum SlotError {
    #[error("not enough units: requested {requested}, available {available}")]
    NotEnough { requested: u32, available: u32 },
    #[error("negative units")]
    Negative,
}

#[async_trait]
impl ActorEntity for Slot {
    type Id = u32;
    type Create = SlotCreate;
    type Update = SlotUpdate;
    type Query = SlotQuery;
    type Action = SlotAction;
    type ActionResult = u32;
    type Context = ();
    type Error = SlotError;

    fn requested_id(params: &SlotCreate) -> Option<u32> {
        params.code
    }

    fn from_create_params(id: u32, params: SlotCreate) -> Result<Self, Self::Error> {
        Ok(Self {
            id,
            aisle: params.aisle,
            units: params.units,
        })
    }

    fn matches(&self, query: &SlotQuery) -> bool {
        query.aisle.as_ref().is_none_or(|aisle| &self.aisle == aisle)
    }

    async fn on_update(&mut self, update: SlotUpdate, _ctx: &()) -> Result<(), Self::Error> {
        // Mutate first, then fail: the actor must not keep the partial change.
        let units = i64::from(self.units) + update.units;
        self.aisle.push('*');
        self.units = u32::try_from(units).map_err(|_| SlotError::Negative)?;
        Ok(())
    }

    async fn handle_action(&mut self, action: SlotAction, _ctx: &()) -> Result<u32, Self::Error> {
        match action {
            SlotAction::Take(n) if n > self.units => Err(SlotError::NotEnough {
                requested: n,
                available: self.units,
            }),
            SlotAction::Take(n) => {
                self.units -= n;
                Ok(self.units)
            }
        }
    }
}

fn slot(code: Option<u32>, aisle: &str, units: u32) -> SlotCreate {
    SlotCreate {
        code,
        aisle: aisle.to_string(),
        units,
    }
}

#[tokio::test]
async fn test_framework_full_lifecycle() {
    let (actor, client) = ResourceActor::<Slot>::new(10);
    let handle = tokio::spawn(actor.run(()));

    let id: u32 = client.create(slot(None, "A", 5)).await.unwrap();
    assert_eq!(id, 1);

    let left = client.perform_action(id, SlotAction::Take(2)).await.unwrap();
    assert_eq!(left, 3);

    let err = client
        .perform_action(id, SlotAction::Take(10))
        .await
        .unwrap_err()
        .downcast_entity::<SlotError>()
        .unwrap();
    assert_eq!(err, SlotError::NotEnough { requested: 10, available: 3 });

    let updated = client.update(id, SlotUpdate { units: 4 }).await.unwrap();
    assert_eq!(updated.units, 7);

    client.delete(id).await.unwrap();
    assert!(client.get(id).await.unwrap().is_none());
    assert!(matches!(client.delete(id).await, Err(FrameworkError::NotFound(_))));

    drop(client);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_caller_assigned_ids_and_duplicates() {
    let (actor, client) = ResourceActor::<Slot>::new(10);
    tokio::spawn(actor.run(()));

    assert_eq!(client.create(slot(Some(1), "A", 1)).await.unwrap(), 1);
    assert!(matches!(
        client.create(slot(Some(1), "B", 1)).await,
        Err(FrameworkError::AlreadyExists(_))
    ));

    // Generated ids skip values already taken by caller-assigned ones.
    assert_eq!(client.create(slot(None, "C", 1)).await.unwrap(), 2);
    assert_eq!(client.get(1).await.unwrap().unwrap().aisle, "A");
}

#[tokio::test]
async fn test_failed_update_keeps_previous_state() {
    let (actor, client) = ResourceActor::<Slot>::new(10);
    tokio::spawn(actor.run(()));

    let id = client.create(slot(None, "A", 2)).await.unwrap();
    let result = client.update(id, SlotUpdate { units: -5 }).await;
    assert!(matches!(result, Err(FrameworkError::EntityError(_))));

    let stored = client.get(id).await.unwrap().unwrap();
    assert_eq!(stored, Slot { id, aisle: "A".to_string(), units: 2 });
}

#[tokio::test]
async fn test_list_filters_and_paginates_in_id_order() {
    let (actor, client) = ResourceActor::<Slot>::new(10);
    tokio::spawn(actor.run(()));

    for (code, aisle) in [(5, "A"), (2, "B"), (9, "A"), (1, "A"), (7, "A")] {
        client.create(slot(Some(code), aisle, 1)).await.unwrap();
    }

    let all_a = client
        .list(SlotQuery { aisle: Some("A".into()) }, None)
        .await
        .unwrap();
    let ids: Vec<u32> = all_a.items.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![1, 5, 7, 9]);
    assert_eq!(all_a.total, 4);

    let second_page = client
        .list(SlotQuery { aisle: Some("A".into()) }, Some(PageRequest::new(2, 3)))
        .await
        .unwrap();
    let ids: Vec<u32> = second_page.items.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![9]);
    assert_eq!(second_page.total, 4);
    assert_eq!(second_page.total_pages(), 2);

    let invalid = client.list(SlotQuery { aisle: None }, Some(PageRequest::new(0, 3))).await;
    assert!(matches!(invalid, Err(FrameworkError::InvalidPage(_))));
}
