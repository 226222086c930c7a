use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::server::{
    data::catalog::{ManufacturerRepository, ShipComponentRepository, ShipRepository},
    error::Error,
    scapi,
    service::sync::{
        reconcile::{self, Outcome},
        report::SyncReport,
    },
};

pub struct ShipSyncService<'a> {
    db: &'a DatabaseConnection,
    sc_client: &'a scapi::Client,
}

impl<'a> ShipSyncService<'a> {
    /// Creates a new instance of [`ShipSyncService`]
    pub fn new(db: &'a DatabaseConnection, sc_client: &'a scapi::Client) -> Self {
        Self { db, sc_client }
    }

    /// Fetches the full ship list and reconciles it into the catalog.
    ///
    /// Each item runs in its own transaction; malformed items are counted
    /// and logged without aborting the rest of the batch. A transport or
    /// upstream failure on the initial fetch aborts the whole run.
    pub async fn sync_ships(&self, force: bool) -> Result<SyncReport, Error> {
        let ships = self.sc_client.get_ships().await?;

        tracing::info!(count = ships.len(), "fetched ships from the Star Citizen API");

        let mut report = SyncReport::default();

        for payload in &ships {
            match self.sync_ship(payload, force).await {
                Ok(outcome) => report.record(outcome),
                Err(err) => {
                    report.record_error();
                    tracing::error!(
                        ship = %ship_label(payload),
                        error = %err,
                        "failed to sync ship"
                    );
                }
            }
        }

        tracing::info!(%report, "ship sync complete");

        Ok(report)
    }

    /// Reconciles a single ship payload inside one transaction.
    ///
    /// The manufacturer is resolved first (get-or-create by code) so the
    /// foreign key is always satisfiable. An upstream numeric id takes
    /// precedence over the (manufacturer, model) composite key when both
    /// could match.
    pub async fn sync_ship(
        &self,
        payload: &serde_json::Value,
        force: bool,
    ) -> Result<Outcome, Error> {
        let (manufacturer_draft, ship_draft, components) = reconcile::map_ship(payload)?;

        let txn = self.db.begin().await?;

        let manufacturer_repo = ManufacturerRepository::new(&txn);
        let ship_repo = ShipRepository::new(&txn);
        let component_repo = ShipComponentRepository::new(&txn);

        let manufacturer = manufacturer_repo.get_or_create(&manufacturer_draft).await?;

        let existing = match ship_draft.external_id {
            Some(external_id) => ship_repo.get_by_external_id(external_id).await?,
            None => None,
        };
        let existing = match existing {
            Some(ship) => Some(ship),
            None => {
                ship_repo
                    .get_by_natural_key(manufacturer.id, &ship_draft.model)
                    .await?
            }
        };

        let outcome = match (reconcile::decide(existing.is_some(), force), existing) {
            (Outcome::Create, _) => {
                let ship = ship_repo.create(manufacturer.id, &ship_draft).await?;
                component_repo.replace_for_ship(ship.id, &components).await?;
                Outcome::Create
            }
            (Outcome::Update, Some(ship)) => {
                let ship = ship_repo.update(ship, manufacturer.id, &ship_draft).await?;
                component_repo.replace_for_ship(ship.id, &components).await?;
                Outcome::Update
            }
            (outcome, _) => outcome,
        };

        txn.commit().await?;

        Ok(outcome)
    }
}

fn ship_label(payload: &serde_json::Value) -> String {
    payload
        .get("name")
        .and_then(serde_json::Value::as_str)
        .unwrap_or("Unknown")
        .to_string()
}

#[cfg(test)]
mod tests {
    use sea_orm::{EntityTrait, PaginatorTrait};
    use stanton_test_utils::prelude::*;

    use super::*;

    async fn setup() -> Result<TestSetup, TestError> {
        test_setup_with_tables!(
            entity::prelude::Manufacturer,
            entity::prelude::Ship,
            entity::prelude::ShipComponent
        )
    }

    fn sc_client_for(test: &TestSetup) -> scapi::Client {
        scapi::Client::builder()
            .base_url(&test.server.url())
            .api_key(stanton_test_utils::constant::TEST_SC_API_KEY)
            .build()
            .unwrap()
    }

    fn ships_body(ships: &[serde_json::Value]) -> String {
        serde_json::json!({"success": 1, "data": ships}).to_string()
    }

    /// Expect a first run to create and a second unforced run to skip
    /// everything without new rows
    #[tokio::test]
    async fn second_unforced_run_is_idempotent() -> Result<(), TestError> {
        let mut test = setup().await?;
        let ships = vec![
            factory::ship_payload(1, "Sabre", "AEGS"),
            factory::ship_payload(2, "Gladius", "AEGS"),
        ];
        let endpoint = test
            .server
            .mock("GET", "/test_sc_key/v1/cache/ships")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(ships_body(&ships))
            .create();

        let sc_client = sc_client_for(&test);
        let service = ShipSyncService::new(&test.app_db, &sc_client);

        let first = service.sync_ships(false).await.unwrap();
        assert_eq!(first.created, 2);
        assert_eq!(first.errored, 0);

        let second = service.sync_ships(false).await.unwrap();
        assert_eq!(second.created, 0);
        assert_eq!(second.skipped, 2);

        let count = entity::prelude::Ship::find().count(&test.app_db).await?;
        assert_eq!(count, 2);

        // The second run was served from the response cache.
        endpoint.assert();

        Ok(())
    }

    /// Expect a forced run to overwrite a changed upstream field in place
    #[tokio::test]
    async fn forced_run_overwrites_changed_fields() -> Result<(), TestError> {
        let mut test = setup().await?;
        let mut ship = factory::ship_payload(1, "Sabre", "AEGS");
        test.server
            .mock("GET", "/test_sc_key/v1/cache/ships")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(ships_body(std::slice::from_ref(&ship)))
            .create();

        let sc_client = sc_client_for(&test);
        let service = ShipSyncService::new(&test.app_db, &sc_client);
        service.sync_ships(false).await.unwrap();

        // Upstream changes the cargo capacity.
        ship["cargo"] = serde_json::json!(96);
        test.server.reset();
        test.server
            .mock("GET", "/test_sc_key/v1/cache/ships")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(ships_body(std::slice::from_ref(&ship)))
            .create();

        // Bypass the cached first response, then force the overwrite.
        sc_client.clear_cache(None);
        let report = service.sync_ships(true).await.unwrap();
        assert_eq!(report.updated, 1);
        assert_eq!(report.created, 0);

        let stored = entity::prelude::Ship::find().all(&test.app_db).await?;
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].cargo_capacity, Some(96));

        Ok(())
    }

    /// Expect a malformed item to be counted as errored while the rest of
    /// the batch still lands
    #[tokio::test]
    async fn malformed_item_does_not_abort_the_batch() -> Result<(), TestError> {
        let mut test = setup().await?;
        let ships = vec![
            factory::ship_payload(1, "Sabre", "AEGS"),
            serde_json::json!({"model": "no name here"}),
            factory::ship_payload(3, "Gladius", "AEGS"),
        ];
        test.server
            .mock("GET", "/test_sc_key/v1/cache/ships")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(ships_body(&ships))
            .create();

        let sc_client = sc_client_for(&test);
        let service = ShipSyncService::new(&test.app_db, &sc_client);

        let report = service.sync_ships(false).await.unwrap();

        assert_eq!(report.created, 2);
        assert_eq!(report.errored, 1);
        assert_eq!(report.processed(), 3);

        Ok(())
    }

    /// Expect an upstream transport failure to abort the run as a whole
    #[tokio::test]
    async fn upstream_failure_aborts_the_run() -> Result<(), TestError> {
        let mut test = setup().await?;
        test.server
            .mock("GET", "/test_sc_key/v1/cache/ships")
            .with_status(500)
            .create();

        let sc_client = sc_client_for(&test);
        let service = ShipSyncService::new(&test.app_db, &sc_client);

        let result = service.sync_ships(false).await;

        assert!(matches!(result, Err(Error::ScApiError(_))));

        Ok(())
    }

    /// Expect ships sharing a manufacturer to reuse one manufacturer row
    #[tokio::test]
    async fn manufacturer_rows_are_shared() -> Result<(), TestError> {
        let mut test = setup().await?;
        let ships = vec![
            factory::ship_payload(1, "Sabre", "AEGS"),
            factory::ship_payload(2, "Gladius", "AEGS"),
            factory::ship_payload(3, "300i", "ORIG"),
        ];
        test.server
            .mock("GET", "/test_sc_key/v1/cache/ships")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(ships_body(&ships))
            .create();

        let sc_client = sc_client_for(&test);
        let service = ShipSyncService::new(&test.app_db, &sc_client);
        service.sync_ships(false).await.unwrap();

        let manufacturers = entity::prelude::Manufacturer::find()
            .count(&test.app_db)
            .await?;
        assert_eq!(manufacturers, 2);

        Ok(())
    }
}
