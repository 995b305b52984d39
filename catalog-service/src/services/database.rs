use crate::config::StoreConfig;
use crate::models::Product;
use crate::services::ProductStore;
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::doc,
    options::{ClientOptions, Credential, FindOptions, ServerAddress},
    Client as MongoClient, Collection,
};
use secrecy::ExposeSecret;
use service_core::error::AppError;

const APP_NAME: &str = "catalog-service";

/// Products container backed by a MongoDB-compatible store (MongoDB or the
/// Cosmos DB API for MongoDB).
///
/// The driver client is pooled and safe to share; cloning is cheap.
#[derive(Clone)]
pub struct CatalogDb {
    client: MongoClient,
    products: Collection<Product>,
}

impl CatalogDb {
    pub async fn connect(config: &StoreConfig) -> Result<Self, AppError> {
        let mut options = ClientOptions::parse(&config.endpoint).await.map_err(|e| {
            tracing::error!("Invalid document store endpoint: {}", e);
            AppError::from(e)
        })?;
        options.app_name = Some(APP_NAME.to_string());

        if let Some(key) = &config.key {
            let credential = keyed_credential(
                options.credential.take(),
                &options.hosts,
                key.expose_secret(),
            );
            options.credential = Some(credential);
        }

        let client = MongoClient::with_options(options).map_err(|e| {
            tracing::error!("Failed to create document store client: {}", e);
            AppError::from(e)
        })?;
        let products = client
            .database(&config.database)
            .collection(&config.container);

        tracing::info!(
            database = %config.database,
            container = %config.container,
            "Document store client ready"
        );

        Ok(Self { client, products })
    }

    pub fn products(&self) -> &Collection<Product> {
        &self.products
    }

    pub fn client(&self) -> &MongoClient {
        &self.client
    }
}

#[async_trait]
impl ProductStore for CatalogDb {
    async fn list_products(&self, limit: i64) -> Result<Vec<Product>, AppError> {
        let options = FindOptions::builder()
            .limit(limit)
            .projection(doc! { "_id": 1, "name": 1, "category": 1 })
            .build();

        let cursor = self.products.find(doc! {}, options).await?;
        let products: Vec<Product> = cursor.try_collect().await?;
        Ok(products)
    }

    async fn create_product(&self, product: Product) -> Result<(), AppError> {
        self.products.insert_one(product, None).await?;
        Ok(())
    }
}

/// Attach the account key as the connection password.
///
/// A username from the connection string is kept; otherwise the account name
/// (first DNS label of the first host) is used, which is what Cosmos DB expects.
fn keyed_credential(
    existing: Option<Credential>,
    hosts: &[ServerAddress],
    key: &str,
) -> Credential {
    let mut credential = existing.unwrap_or_default();
    if credential.username.is_none() {
        credential.username = account_name(hosts);
    }
    credential.password = Some(key.to_string());
    credential
}

fn account_name(hosts: &[ServerAddress]) -> Option<String> {
    match hosts.first()? {
        ServerAddress::Tcp { host, .. } => host
            .split('.')
            .next()
            .filter(|label| !label.is_empty())
            .map(str::to_string),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tcp(host: &str) -> ServerAddress {
        ServerAddress::parse(host).unwrap()
    }

    #[test]
    fn account_name_is_first_host_label() {
        let hosts = vec![tcp("shopacct.mongo.cosmos.azure.com:10255")];
        assert_eq!(account_name(&hosts).as_deref(), Some("shopacct"));
        assert_eq!(account_name(&[]), None);
    }

    #[test]
    fn key_becomes_password_with_derived_username() {
        let hosts = vec![tcp("shopacct.mongo.cosmos.azure.com:10255")];
        let credential = keyed_credential(None, &hosts, "k3y");

        assert_eq!(credential.username.as_deref(), Some("shopacct"));
        assert_eq!(credential.password.as_deref(), Some("k3y"));
    }

    #[test]
    fn explicit_username_is_kept() {
        let hosts = vec![tcp("localhost:27017")];
        let mut existing = Credential::default();
        existing.username = Some("catalog".to_string());

        let credential = keyed_credential(Some(existing), &hosts, "k3y");
        assert_eq!(credential.username.as_deref(), Some("catalog"));
        assert_eq!(credential.password.as_deref(), Some("k3y"));
    }
}
