use aws_sdk_dynamodb::types::{AttributeValue, Select};
use aws_sdk_dynamodb::{Client as DynamoDbClient, Error as DynamoDbError};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{error, Instrument};

use super::attributes::Item;
use crate::models::{RepositoryError, RepositoryResult};

/// Filter applied to a scan or query, e.g. `available = :available`
pub struct ItemFilter {
    pub expression: &'static str,
    pub values: HashMap<String, AttributeValue>,
}

impl ItemFilter {
    pub fn available_only() -> Self {
        Self {
            expression: "available = :available",
            values: HashMap::from([(":available".to_string(), AttributeValue::Bool(true))]),
        }
    }
}

/// A single DynamoDB table plus the plumbing every repository needs:
/// client spans, error mapping and paginated reads
#[derive(Clone)]
pub struct DynamoDbTable {
    client: Arc<DynamoDbClient>,
    table_name: String,
    region: String,
}

impl DynamoDbTable {
    pub fn new(client: Arc<DynamoDbClient>, table_name: String, region: String) -> Self {
        Self {
            client,
            table_name,
            region,
        }
    }

    pub fn client(&self) -> &DynamoDbClient {
        &self.client
    }

    pub fn name(&self) -> &str {
        &self.table_name
    }

    /// Create a client span carrying the AWS and database semantic attributes
    pub fn span(&self, operation: &str) -> tracing::Span {
        tracing::info_span!(
            "DynamoDB",
            "aws.service" = "DynamoDB",
            "aws.operation" = operation,
            "aws.region" = %self.region,
            "aws.dynamodb.table_name" = %self.table_name,
            "aws.remote.service" = "AWS::DynamoDB",
            "aws.remote.operation" = operation,
            "aws.remote.resource.type" = "AWS::DynamoDB::Table",
            "aws.remote.resource.identifier" = %self.table_name,
            "otel.kind" = "client",
            "otel.name" = format!("DynamoDB.{}", operation),
            "rpc.system" = "aws-api",
            "rpc.service" = "AmazonDynamoDBv2",
            "rpc.method" = operation,
            "db.system" = "dynamodb",
            "db.name" = %self.table_name,
            "db.operation" = operation,
        )
    }

    /// Convert DynamoDB error to RepositoryError
    pub fn map_error(&self, error: DynamoDbError) -> RepositoryError {
        error!(table = %self.table_name, "DynamoDB error: {:?}", error);

        match error {
            DynamoDbError::ResourceNotFoundException(_) => RepositoryError::TableNotFound {
                table_name: self.table_name.clone(),
            },
            DynamoDbError::ConditionalCheckFailedException(_) => {
                RepositoryError::ConstraintViolation {
                    message: format!("Conditional check failed on {}", self.table_name),
                }
            }
            DynamoDbError::ProvisionedThroughputExceededException(_)
            | DynamoDbError::RequestLimitExceeded(_) => RepositoryError::RateLimitExceeded,
            other => RepositoryError::AwsSdk {
                message: other.to_string(),
            },
        }
    }

    /// Read every item of the table, following `LastEvaluatedKey`
    pub async fn scan_all(&self, filter: Option<ItemFilter>) -> RepositoryResult<Vec<Item>> {
        async {
            let mut items = Vec::new();
            let mut start_key: Option<Item> = None;

            loop {
                let mut request = self
                    .client
                    .scan()
                    .table_name(&self.table_name)
                    .set_exclusive_start_key(start_key.take());

                if let Some(filter) = &filter {
                    request = request
                        .filter_expression(filter.expression)
                        .set_expression_attribute_values(Some(filter.values.clone()));
                }

                let output = request
                    .send()
                    .await
                    .map_err(|e| self.map_error(e.into()))?;

                items.extend(output.items.unwrap_or_default());

                match output.last_evaluated_key {
                    Some(key) if !key.is_empty() => start_key = Some(key),
                    _ => break,
                }
            }

            Ok(items)
        }
        .instrument(self.span("Scan"))
        .await
    }

    /// Query a global secondary index on a single string hash key
    pub async fn query_index(
        &self,
        index_name: &str,
        key_name: &str,
        key_value: &str,
        filter: Option<ItemFilter>,
    ) -> RepositoryResult<Vec<Item>> {
        async {
            let mut items = Vec::new();
            let mut start_key: Option<Item> = None;

            loop {
                let mut values = HashMap::from([(
                    ":key".to_string(),
                    AttributeValue::S(key_value.to_string()),
                )]);
                let mut request = self
                    .client
                    .query()
                    .table_name(&self.table_name)
                    .index_name(index_name)
                    .key_condition_expression("#key = :key")
                    .expression_attribute_names("#key", key_name)
                    .set_exclusive_start_key(start_key.take());

                if let Some(filter) = &filter {
                    values.extend(filter.values.clone());
                    request = request.filter_expression(filter.expression);
                }

                let output = request
                    .set_expression_attribute_values(Some(values))
                    .send()
                    .await
                    .map_err(|e| self.map_error(e.into()))?;

                items.extend(output.items.unwrap_or_default());

                match output.last_evaluated_key {
                    Some(key) if !key.is_empty() => start_key = Some(key),
                    _ => break,
                }
            }

            Ok(items)
        }
        .instrument(self.span("Query"))
        .await
    }

    /// Count the items in the table
    pub async fn count(&self) -> RepositoryResult<usize> {
        async {
            let mut total = 0usize;
            let mut start_key: Option<Item> = None;

            loop {
                let output = self
                    .client
                    .scan()
                    .table_name(&self.table_name)
                    .select(Select::Count)
                    .set_exclusive_start_key(start_key.take())
                    .send()
                    .await
                    .map_err(|e| self.map_error(e.into()))?;

                total += output.count().max(0) as usize;

                match output.last_evaluated_key {
                    Some(key) if !key.is_empty() => start_key = Some(key),
                    _ => break,
                }
            }

            Ok(total)
        }
        .instrument(self.span("Scan"))
        .await
    }

    /// Fetch a single item by its hash key
    pub async fn get(&self, key_name: &str, key_value: &str) -> RepositoryResult<Option<Item>> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(key_name, AttributeValue::S(key_value.to_string()))
            .send()
            .instrument(self.span("GetItem"))
            .await
            .map_err(|e| self.map_error(e.into()))?;

        Ok(output.item)
    }

    /// Insert an item, refusing to overwrite an existing key
    pub async fn put_new(&self, key_name: &str, item: Item) -> RepositoryResult<()> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .condition_expression("attribute_not_exists(#key)")
            .expression_attribute_names("#key", key_name)
            .send()
            .instrument(self.span("PutItem"))
            .await
            .map_err(|e| self.map_error(e.into()))?;

        Ok(())
    }
}
