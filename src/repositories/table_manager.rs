use aws_sdk_dynamodb::types::{
    AttributeDefinition, BillingMode, GlobalSecondaryIndex, KeySchemaElement, KeyType,
    Projection, ProjectionType, ScalarAttributeType, TableStatus,
};
use aws_sdk_dynamodb::{Client as DynamoDbClient, Error as DynamoDbError};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, instrument, warn};

use super::{
    DynamoDbBookingRepository, DynamoDbMenuRepository, DynamoDbOrderRepository,
    DynamoDbRoomRepository,
};
use crate::config::DatabaseConfig;
use crate::models::{RepositoryError, RepositoryResult};

/// Manages DynamoDB table creation and configuration
pub struct TableManager {
    client: Arc<DynamoDbClient>,
    poll_interval: Duration,
    max_attempts: u32,
}

fn build_error(what: &str, e: impl std::fmt::Display) -> RepositoryError {
    RepositoryError::AwsSdk {
        message: format!("Failed to build {}: {}", what, e),
    }
}

fn string_attribute(name: &str) -> RepositoryResult<AttributeDefinition> {
    AttributeDefinition::builder()
        .attribute_name(name)
        .attribute_type(ScalarAttributeType::S)
        .build()
        .map_err(|e| build_error("attribute definition", e))
}

fn hash_key(name: &str) -> RepositoryResult<KeySchemaElement> {
    KeySchemaElement::builder()
        .attribute_name(name)
        .key_type(KeyType::Hash)
        .build()
        .map_err(|e| build_error("key schema", e))
}

impl TableManager {
    pub fn new(client: Arc<DynamoDbClient>) -> Self {
        Self {
            client,
            poll_interval: Duration::from_secs(10),
            max_attempts: 30,
        }
    }

    /// Create a table keyed by a single string hash key, optionally with a
    /// global secondary index on another string attribute
    #[instrument(skip(self), fields(table_name = %table_name))]
    pub async fn create_table(
        &self,
        table_name: &str,
        key: &str,
        index: Option<(&str, &str)>,
    ) -> RepositoryResult<()> {
        if self.table_exists(table_name).await? {
            info!("Table {} already exists", table_name);
            return Ok(());
        }

        info!("Creating table");

        let mut attribute_definitions = vec![string_attribute(key)?];
        let mut request = self
            .client
            .create_table()
            .table_name(table_name)
            .key_schema(hash_key(key)?)
            .billing_mode(BillingMode::PayPerRequest);

        if let Some((index_name, index_key)) = index {
            attribute_definitions.push(string_attribute(index_key)?);

            let gsi = GlobalSecondaryIndex::builder()
                .index_name(index_name)
                .key_schema(hash_key(index_key)?)
                .projection(
                    Projection::builder()
                        .projection_type(ProjectionType::All)
                        .build(),
                )
                .build()
                .map_err(|e| build_error("GSI", e))?;

            request = request.global_secondary_indexes(gsi);
        }

        request
            .set_attribute_definitions(Some(attribute_definitions))
            .send()
            .await
            .map_err(|e| self.map_dynamodb_error(e.into()))?;

        info!("Table creation initiated, waiting for table to become active");
        self.wait_for_table_active(table_name).await?;
        info!("Table {} created successfully", table_name);

        Ok(())
    }

    /// Check if a table exists
    #[instrument(skip(self), fields(table_name = %table_name))]
    pub async fn table_exists(&self, table_name: &str) -> RepositoryResult<bool> {
        match self.client.describe_table().table_name(table_name).send().await {
            Ok(_) => Ok(true),
            Err(e) => match DynamoDbError::from(e) {
                DynamoDbError::ResourceNotFoundException(_) => {
                    info!("Table {} does not exist", table_name);
                    Ok(false)
                }
                other => {
                    error!("Error checking table existence: {}", other);
                    Err(RepositoryError::ConnectionFailed)
                }
            },
        }
    }

    /// Wait for a table to become active
    #[instrument(skip(self), fields(table_name = %table_name))]
    async fn wait_for_table_active(&self, table_name: &str) -> RepositoryResult<()> {
        let mut attempts = 0;

        loop {
            match self.client.describe_table().table_name(table_name).send().await {
                Ok(response) => {
                    if let Some(table) = response.table {
                        match table.table_status {
                            Some(TableStatus::Active) => {
                                info!("Table {} is now active", table_name);
                                return Ok(());
                            }
                            Some(status) => {
                                info!("Table {} status: {:?}, waiting...", table_name, status);
                            }
                            None => {
                                warn!("Table {} status unknown, waiting...", table_name);
                            }
                        }
                    }
                }
                Err(e) => {
                    error!("Error checking table status: {}", e);
                    return Err(self.map_dynamodb_error(e.into()));
                }
            }

            attempts += 1;
            if attempts >= self.max_attempts {
                error!("Timeout waiting for table {} to become active", table_name);
                return Err(RepositoryError::Timeout);
            }

            tokio::time::sleep(self.poll_interval).await;
        }
    }

    /// Create the rooms, menu, bookings and orders tables
    #[instrument(skip(self, config))]
    pub async fn create_all_tables(&self, config: &DatabaseConfig) -> RepositoryResult<()> {
        info!("Creating all tables");

        let (rooms, menu, bookings, orders) = tokio::join!(
            self.create_table(&config.rooms_table_name, DynamoDbRoomRepository::KEY, None),
            self.create_table(
                &config.menu_table_name,
                DynamoDbMenuRepository::KEY,
                Some((DynamoDbMenuRepository::MENU_TYPE_INDEX, "menu_type")),
            ),
            self.create_table(
                &config.bookings_table_name,
                DynamoDbBookingRepository::KEY,
                None
            ),
            self.create_table(&config.orders_table_name, DynamoDbOrderRepository::KEY, None),
        );

        rooms?;
        menu?;
        bookings?;
        orders?;

        info!("All tables ready");
        Ok(())
    }

    fn map_dynamodb_error(&self, error: DynamoDbError) -> RepositoryError {
        error!("DynamoDB error: {:?}", error);
        RepositoryError::AwsSdk {
            message: error.to_string(),
        }
    }
}
