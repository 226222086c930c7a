use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::server::{
    data::catalog::{OrgMemberRepository, OrganizationRepository},
    error::{catalog::CatalogError, Error},
    scapi,
    service::sync::{
        reconcile::{self, Outcome},
        report::SyncReport,
    },
};

pub struct OrgSyncService<'a> {
    db: &'a DatabaseConnection,
    sc_client: &'a scapi::Client,
}

impl<'a> OrgSyncService<'a> {
    /// Creates a new instance of [`OrgSyncService`]
    pub fn new(db: &'a DatabaseConnection, sc_client: &'a scapi::Client) -> Self {
        Self { db, sc_client }
    }

    /// Fetches an organization by SID and upserts the single local row.
    ///
    /// Unlike batch syncs there is no skip outcome here; a one-row sync is
    /// always an overwrite.
    pub async fn sync_organization(&self, sid: &str) -> Result<Outcome, Error> {
        let sid = sid.to_uppercase();

        let payload = self
            .sc_client
            .get_organization(&sid)
            .await?
            .ok_or_else(|| CatalogError::OrganizationNotFound(sid.clone()))?;

        let draft = reconcile::map_organization(&sid, &payload);

        let txn = self.db.begin().await?;
        let repo = OrganizationRepository::new(&txn);

        let outcome = match repo.get_by_sid(&sid).await? {
            Some(existing) => {
                repo.update(existing, &draft).await?;
                Outcome::Update
            }
            None => {
                repo.create(&sid, &draft).await?;
                Outcome::Create
            }
        };

        txn.commit().await?;

        tracing::info!(%sid, ?outcome, "organization sync complete");

        Ok(outcome)
    }

    /// Fetches the member roster and reconciles it into the stored roster,
    /// then recomputes the organization's member count from what is actually
    /// stored rather than trusting the upstream figure.
    pub async fn sync_members(&self, sid: &str, force: bool) -> Result<SyncReport, Error> {
        let sid = sid.to_uppercase();

        let organization = OrganizationRepository::new(self.db)
            .get_by_sid(&sid)
            .await?
            .ok_or_else(|| CatalogError::OrganizationNotSynced(sid.clone()))?;

        let members = self.sc_client.get_organization_members(&sid).await?;

        tracing::info!(%sid, count = members.len(), "fetched members from the Star Citizen API");

        let mut report = SyncReport::default();

        for payload in &members {
            match self.sync_member(organization.id, payload, force).await {
                Ok(outcome) => report.record(outcome),
                Err(err) => {
                    report.record_error();
                    tracing::error!(
                        handle = %member_label(payload),
                        error = %err,
                        "failed to sync organization member"
                    );
                }
            }
        }

        let stored = OrgMemberRepository::new(self.db)
            .count_by_organization(organization.id)
            .await?;
        let member_count = i32::try_from(stored).unwrap_or(i32::MAX);

        OrganizationRepository::new(self.db)
            .set_member_count(organization, member_count)
            .await?;

        tracing::info!(%sid, %report, member_count, "member sync complete");

        Ok(report)
    }

    async fn sync_member(
        &self,
        organization_id: i32,
        payload: &serde_json::Value,
        force: bool,
    ) -> Result<Outcome, Error> {
        let draft = reconcile::map_org_member(payload)?;

        let txn = self.db.begin().await?;
        let repo = OrgMemberRepository::new(&txn);

        let existing = repo.get_by_handle(organization_id, &draft.handle).await?;

        let outcome = match (reconcile::decide(existing.is_some(), force), existing) {
            (Outcome::Create, _) => {
                repo.create(organization_id, &draft).await?;
                Outcome::Create
            }
            (Outcome::Update, Some(member)) => {
                repo.update(member, &draft).await?;
                Outcome::Update
            }
            (outcome, _) => outcome,
        };

        txn.commit().await?;

        Ok(outcome)
    }
}

fn member_label(payload: &serde_json::Value) -> String {
    payload
        .get("handle")
        .and_then(serde_json::Value::as_str)
        .unwrap_or("Unknown")
        .to_string()
}

#[cfg(test)]
mod tests {
    use stanton_test_utils::prelude::*;

    use super::*;

    async fn setup() -> Result<TestSetup, TestError> {
        test_setup_with_tables!(
            entity::prelude::Organization,
            entity::prelude::OrganizationMember
        )
    }

    fn sc_client_for(test: &TestSetup) -> scapi::Client {
        scapi::Client::builder()
            .base_url(&test.server.url())
            .api_key(stanton_test_utils::constant::TEST_SC_API_KEY)
            .build()
            .unwrap()
    }

    fn envelope(data: serde_json::Value) -> String {
        serde_json::json!({"success": 1, "data": data}).to_string()
    }

    /// Expect org sync to create on first run and update in place after
    #[tokio::test]
    async fn organization_upserts_by_sid() -> Result<(), TestError> {
        let mut test = setup().await?;
        test.server
            .mock("GET", "/test_sc_key/v1/live/organization/FAROUT")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(envelope(factory::organization_payload("Farout Corp", 3)))
            .create();

        let sc_client = sc_client_for(&test);
        let service = OrgSyncService::new(&test.app_db, &sc_client);

        // Lowercase input SIDs are normalized.
        let first = service.sync_organization("farout").await.unwrap();
        assert_eq!(first, Outcome::Create);

        let second = service.sync_organization("FAROUT").await.unwrap();
        assert_eq!(second, Outcome::Update);

        let repo = OrganizationRepository::new(&test.app_db);
        let stored = repo.get_by_sid("FAROUT").await?;
        assert!(stored.is_some());

        Ok(())
    }

    /// Expect a missing upstream organization to fail with a catalog error
    #[tokio::test]
    async fn missing_organization_is_an_error() -> Result<(), TestError> {
        let mut test = setup().await?;
        test.server
            .mock("GET", "/test_sc_key/v1/live/organization/NOPE")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"success": 1, "data": null}"#)
            .create();

        let sc_client = sc_client_for(&test);
        let service = OrgSyncService::new(&test.app_db, &sc_client);

        let result = service.sync_organization("NOPE").await;

        assert!(matches!(
            result,
            Err(Error::CatalogError(CatalogError::OrganizationNotFound(_)))
        ));

        Ok(())
    }

    /// Expect member sync to require a prior organization sync
    #[tokio::test]
    async fn member_sync_requires_synced_organization() -> Result<(), TestError> {
        let test = setup().await?;

        let sc_client = sc_client_for(&test);
        let service = OrgSyncService::new(&test.app_db, &sc_client);

        let result = service.sync_members("FAROUT", false).await;

        assert!(matches!(
            result,
            Err(Error::CatalogError(CatalogError::OrganizationNotSynced(_)))
        ));

        Ok(())
    }

    /// Expect the member count to be recomputed from stored rows, isolating
    /// blank-handle entries as per-item errors
    #[tokio::test]
    async fn member_sync_recounts_and_isolates_errors() -> Result<(), TestError> {
        let mut test = setup().await?;
        test.server
            .mock("GET", "/test_sc_key/v1/live/organization/FAROUT")
            .with_status(200)
            .with_header("content-type", "application/json")
            // Upstream claims 99 members; the stored roster decides.
            .with_body(envelope(factory::organization_payload("Farout Corp", 99)))
            .create();
        test.server
            .mock("GET", "/test_sc_key/v1/live/organization_members/FAROUT")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(envelope(serde_json::json!([
                factory::org_member_payload("kirk"),
                factory::org_member_payload("spock"),
                {"handle": "", "display_name": "ghost"},
            ])))
            .create();

        let sc_client = sc_client_for(&test);
        let service = OrgSyncService::new(&test.app_db, &sc_client);

        service.sync_organization("FAROUT").await.unwrap();
        let report = service.sync_members("FAROUT", false).await.unwrap();

        assert_eq!(report.created, 2);
        assert_eq!(report.errored, 1);

        let repo = OrganizationRepository::new(&test.app_db);
        let organization = repo.get_by_sid("FAROUT").await?.unwrap();
        assert_eq!(organization.member_count, 2);

        Ok(())
    }

    /// Expect a repeat unforced member sync to skip existing handles
    #[tokio::test]
    async fn repeat_member_sync_skips_existing_handles() -> Result<(), TestError> {
        let mut test = setup().await?;
        test.server
            .mock("GET", "/test_sc_key/v1/live/organization/FAROUT")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(envelope(factory::organization_payload("Farout Corp", 2)))
            .create();
        test.server
            .mock("GET", "/test_sc_key/v1/live/organization_members/FAROUT")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(envelope(serde_json::json!([
                factory::org_member_payload("kirk"),
                factory::org_member_payload("spock"),
            ])))
            .create();

        let sc_client = sc_client_for(&test);
        let service = OrgSyncService::new(&test.app_db, &sc_client);

        service.sync_organization("FAROUT").await.unwrap();
        let first = service.sync_members("FAROUT", false).await.unwrap();
        assert_eq!(first.created, 2);

        let second = service.sync_members("FAROUT", false).await.unwrap();
        assert_eq!(second.created, 0);
        assert_eq!(second.skipped, 2);

        Ok(())
    }
}
