//! Temporal join pipeline.
//!
//! Wires the three core stages over the customer-history relations:
//! validate → normalize → department⋈address → result⋈mobile →
//! intersect/project. The department relation drives the cascade; each
//! join is a left-outer interval join, so department cardinality is a
//! lower bound on output cardinality.

use log::info;

use super::error::{JoinError, JoinResult};
use super::intersect::ResultProjector;
use super::join::{IntervalJoinConfig, IntervalJoinProcessor};
use super::normalize::normalize_relation;
use super::types::TemporalRecord;
use crate::tempojoin::schema::{DataType, FieldDefinition, Schema};

/// Namespace prefix for address fields in joined rows
pub const ADDRESS_ALIAS: &str = "a";
/// Namespace prefix for mobile fields in joined rows
pub const MOBILE_ALIAS: &str = "m";

/// The effective-date columns shared by all three relations
const DATE_COLUMNS: [&str; 2] = ["eff_start_date", "eff_end_date"];

/// Schema of the department history relation (the driving side)
pub fn department_schema() -> Schema {
    Schema::new(vec![
        FieldDefinition::new("customer", DataType::String),
        FieldDefinition::new("department", DataType::String),
        FieldDefinition::new("active", DataType::Boolean),
        FieldDefinition::new("eff_start_date", DataType::Date),
        FieldDefinition::new("eff_end_date", DataType::Date),
    ])
}

/// Schema of the address history relation
pub fn address_schema() -> Schema {
    Schema::new(vec![
        FieldDefinition::new("customer", DataType::String),
        FieldDefinition::new("address", DataType::String),
        FieldDefinition::new("eff_start_date", DataType::Date),
        FieldDefinition::new("eff_end_date", DataType::Date),
    ])
}

/// Schema of the mobile-number history relation
pub fn mobile_schema() -> Schema {
    Schema::new(vec![
        FieldDefinition::new("customer", DataType::String),
        FieldDefinition::new("mobile_no", DataType::String),
        FieldDefinition::new("eff_start_date", DataType::Date),
        FieldDefinition::new("eff_end_date", DataType::Date),
    ])
}

/// The two-step cascading temporal join over the customer-history relations
///
/// Both join steps read the department interval through its original,
/// unprefixed column names. Step A never rewrites those columns (address
/// fields land under the `a.` prefix), so Step B tests mobile rows against
/// department's raw interval - not one already narrowed by the address
/// match. The intersected window is derived once, at projection time.
#[derive(Debug, Clone)]
pub struct TemporalJoinPipeline {
    address_join: IntervalJoinProcessor,
    mobile_join: IntervalJoinProcessor,
    projector: ResultProjector,
}

impl TemporalJoinPipeline {
    /// Create a pipeline with the standard relation layout
    pub fn new() -> Self {
        let address_join =
            IntervalJoinProcessor::new(IntervalJoinConfig::new(ADDRESS_ALIAS, address_schema()));
        let mobile_join =
            IntervalJoinProcessor::new(IntervalJoinConfig::new(MOBILE_ALIAS, mobile_schema()));
        Self {
            address_join,
            mobile_join,
            projector: ResultProjector::new(ADDRESS_ALIAS, MOBILE_ALIAS),
        }
    }

    /// Run the full pipeline over three materialized relations
    ///
    /// Validation failures abort before any join executes; everything after
    /// validation is infallible, so a returned error always means no output
    /// was produced.
    pub fn execute(
        &self,
        department: Vec<TemporalRecord>,
        address: Vec<TemporalRecord>,
        mobile: Vec<TemporalRecord>,
    ) -> JoinResult<Vec<TemporalRecord>> {
        validate_relation(&department, &department_schema(), "department")?;
        validate_relation(&address, &address_schema(), "address")?;
        validate_relation(&mobile, &mobile_schema(), "mobile")?;

        let department = normalize_relation(department, &DATE_COLUMNS);
        let address = normalize_relation(address, &DATE_COLUMNS);
        let mobile = normalize_relation(mobile, &DATE_COLUMNS);
        info!(
            "normalized input relations: department={} address={} mobile={}",
            department.len(),
            address.len(),
            mobile.len()
        );

        let joined = self.address_join.left_outer_join(&department, &address);
        info!("department joined address: {} rows", joined.len());

        let joined = self.mobile_join.left_outer_join(&joined, &mobile);
        info!("joined mobile: {} rows", joined.len());

        Ok(self.projector.project_batch(&joined))
    }
}

impl Default for TemporalJoinPipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Check that a relation carries every column its schema requires
///
/// Field names come from the CSV header, so they are uniform across rows
/// and inspecting the first row suffices. An empty relation validates
/// vacuously; downstream it degenerates to the null-match case.
fn validate_relation(
    records: &[TemporalRecord],
    schema: &Schema,
    relation: &str,
) -> JoinResult<()> {
    if let Some(first) = records.first() {
        for name in schema.field_names() {
            if !first.fields.contains_key(name) {
                return Err(JoinError::missing_column(relation, name));
            }
        }
    }
    Ok(())
}
