//! MongoDB-backed collection store

use async_trait::async_trait;
use futures_util::stream::TryStreamExt;
use mongodb::{
    bson::{doc, Document},
    options::{ClientOptions, ServerApi, ServerApiVersion},
    Client, Collection, Database,
};
use tokio::sync::OnceCell;

use crate::{
    config::DatabaseConfig,
    error::AppResult,
    models::{document::bson_to_json, DeleteAck, InsertAck, UpdateAck},
};

use super::{CollectionName, CollectionStore};

/// Lazily connected handle on the catalog database.
///
/// The client is built on first use, so an unreachable cluster (including a
/// failed SRV lookup) surfaces as a 503 from the request that needed it
/// instead of aborting startup. Once built, the client pools connections for
/// every request.
pub struct MongoStore {
    config: DatabaseConfig,
    db: OnceCell<Database>,
}

impl MongoStore {
    pub fn new(config: DatabaseConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    async fn database(&self) -> AppResult<&Database> {
        self.db.get_or_try_init(|| connect(&self.config)).await
    }

    async fn collection(&self, name: CollectionName) -> AppResult<Collection<Document>> {
        Ok(self.database().await?.collection(name.as_str()))
    }
}

/// Build a client for the configured deployment using Stable API v1
async fn connect(config: &DatabaseConfig) -> AppResult<Database> {
    let uri = config.connection_uri();
    let mut options = ClientOptions::parse(uri.as_str()).await?;
    options.server_api = Some(
        ServerApi::builder()
            .version(ServerApiVersion::V1)
            .strict(true)
            .deprecation_errors(true)
            .build(),
    );
    if let Some(mut credential) = config.credential() {
        // Keep the auth source an SRV record may have supplied
        credential.source = options.credential.take().and_then(|c| c.source);
        options.credential = Some(credential);
    }

    let client = Client::with_options(options)?;
    tracing::info!("Database client created for '{}'", config.name);
    Ok(client.database(&config.name))
}

#[async_trait]
impl CollectionStore for MongoStore {
    async fn find(&self, collection: CollectionName, filter: Document) -> AppResult<Vec<Document>> {
        tracing::debug!("find on {} with filter {}", collection, filter);
        let cursor = self.collection(collection).await?.find(filter).await?;
        let documents: Vec<Document> = cursor.try_collect().await?;
        Ok(documents)
    }

    async fn find_one(
        &self,
        collection: CollectionName,
        filter: Document,
    ) -> AppResult<Option<Document>> {
        tracing::debug!("find_one on {} with filter {}", collection, filter);
        Ok(self.collection(collection).await?.find_one(filter).await?)
    }

    async fn insert_one(&self, collection: CollectionName, document: Document) -> AppResult<InsertAck> {
        let result = self.collection(collection).await?.insert_one(document).await?;
        tracing::debug!("inserted {} into {}", result.inserted_id, collection);
        Ok(InsertAck::new(bson_to_json(result.inserted_id)))
    }

    async fn upsert_one(
        &self,
        collection: CollectionName,
        filter: Document,
        fields: Document,
    ) -> AppResult<UpdateAck> {
        let result = self
            .collection(collection)
            .await?
            .replace_one(filter, fields)
            .upsert(true)
            .await?;

        tracing::debug!(
            "upsert on {}: matched={}, modified={}, upserted={:?}",
            collection,
            result.matched_count,
            result.modified_count,
            result.upserted_id
        );

        Ok(UpdateAck::new(
            result.matched_count,
            result.modified_count,
            result.upserted_id.map(bson_to_json),
        ))
    }

    async fn delete_one(&self, collection: CollectionName, filter: Document) -> AppResult<DeleteAck> {
        let result = self.collection(collection).await?.delete_one(filter).await?;
        tracing::debug!("deleted {} from {}", result.deleted_count, collection);
        Ok(DeleteAck::new(result.deleted_count))
    }

    async fn ping(&self) -> AppResult<()> {
        self.database().await?.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}
