//! Chassis thermal subsystem
//!
//! Pure schema declarations plus thin typed views; all parsing goes
//! through the generic engine in [`crate::schema`].

use crate::connector::Connector;
use crate::error::Result;
use crate::resource::common::status_schema;
use crate::resource::{FetchPolicy, Resource};
use crate::schema::{AttributeSet, Field, Schema};
use std::sync::{Arc, OnceLock};

fn fan_schema() -> Arc<Schema> {
    static SCHEMA: OnceLock<Arc<Schema>> = OnceLock::new();
    SCHEMA
        .get_or_init(|| {
            Arc::new(Schema::new(vec![
                Field::new("identity", "MemberId"),
                Field::new("name", "Name"),
                Field::new("physical_context", "PhysicalContext"),
                Field::new("status", "Status").nested(status_schema()),
                Field::new("reading", "Reading"),
                Field::new("reading_units", "ReadingUnits"),
                Field::new("lower_threshold_non_critical", "LowerThresholdNonCritical"),
                Field::new("lower_threshold_critical", "LowerThresholdCritical"),
                Field::new("lower_threshold_fatal", "LowerThresholdFatal"),
                Field::new("min_reading_range", "MinReadingRange"),
                Field::new("max_reading_range", "MaxReadingRange"),
            ]))
        })
        .clone()
}

fn temperature_schema() -> Arc<Schema> {
    static SCHEMA: OnceLock<Arc<Schema>> = OnceLock::new();
    SCHEMA
        .get_or_init(|| {
            Arc::new(Schema::new(vec![
                Field::new("identity", "MemberId"),
                Field::new("name", "Name"),
                Field::new("status", "Status").nested(status_schema()),
                Field::new("reading_celsius", "ReadingCelsius"),
                Field::new("upper_threshold_non_critical", "UpperThresholdNonCritical"),
                Field::new("upper_threshold_critical", "UpperThresholdCritical"),
                Field::new("upper_threshold_fatal", "UpperThresholdFatal"),
                Field::new("min_reading_range_temp", "MinReadingRangeTemp"),
                Field::new("max_reading_range_temp", "MaxReadingRangeTemp"),
                Field::new("physical_context", "PhysicalContext"),
            ]))
        })
        .clone()
}

/// Schema for a chassis thermal document.
pub fn schema() -> Arc<Schema> {
    static SCHEMA: OnceLock<Arc<Schema>> = OnceLock::new();
    SCHEMA
        .get_or_init(|| {
            Arc::new(Schema::new(vec![
                Field::new("identity", "Id").required(),
                Field::new("name", "Name"),
                Field::new("status", "Status").nested(status_schema()),
                Field::new("fans", "Fans").nested_list(fan_schema()),
                Field::new("temperatures", "Temperatures").nested_list(temperature_schema()),
            ]))
        })
        .clone()
}

/// One fan of the thermal subsystem.
#[derive(Debug, Clone, Copy)]
pub struct Fan<'a> {
    attrs: &'a AttributeSet,
}

impl<'a> Fan<'a> {
    pub fn identity(&self) -> Option<&'a str> {
        self.attrs.str("identity")
    }

    pub fn name(&self) -> Option<&'a str> {
        self.attrs.str("name")
    }

    pub fn physical_context(&self) -> Option<&'a str> {
        self.attrs.str("physical_context")
    }

    pub fn status(&self) -> Option<&'a AttributeSet> {
        self.attrs.nested("status")
    }

    pub fn reading(&self) -> Option<i64> {
        self.attrs.int("reading")
    }

    pub fn reading_units(&self) -> Option<&'a str> {
        self.attrs.str("reading_units")
    }

    pub fn lower_threshold_non_critical(&self) -> Option<i64> {
        self.attrs.int("lower_threshold_non_critical")
    }

    pub fn lower_threshold_critical(&self) -> Option<i64> {
        self.attrs.int("lower_threshold_critical")
    }

    pub fn lower_threshold_fatal(&self) -> Option<i64> {
        self.attrs.int("lower_threshold_fatal")
    }

    pub fn min_reading_range(&self) -> Option<i64> {
        self.attrs.int("min_reading_range")
    }

    pub fn max_reading_range(&self) -> Option<i64> {
        self.attrs.int("max_reading_range")
    }
}

/// One temperature sensor of the thermal subsystem.
#[derive(Debug, Clone, Copy)]
pub struct Temperature<'a> {
    attrs: &'a AttributeSet,
}

impl<'a> Temperature<'a> {
    pub fn identity(&self) -> Option<&'a str> {
        self.attrs.str("identity")
    }

    pub fn name(&self) -> Option<&'a str> {
        self.attrs.str("name")
    }

    pub fn status(&self) -> Option<&'a AttributeSet> {
        self.attrs.nested("status")
    }

    pub fn reading_celsius(&self) -> Option<f64> {
        self.attrs.float("reading_celsius")
    }

    pub fn upper_threshold_non_critical(&self) -> Option<f64> {
        self.attrs.float("upper_threshold_non_critical")
    }

    pub fn upper_threshold_critical(&self) -> Option<f64> {
        self.attrs.float("upper_threshold_critical")
    }

    pub fn upper_threshold_fatal(&self) -> Option<f64> {
        self.attrs.float("upper_threshold_fatal")
    }

    pub fn min_reading_range_temp(&self) -> Option<f64> {
        self.attrs.float("min_reading_range_temp")
    }

    pub fn max_reading_range_temp(&self) -> Option<f64> {
        self.attrs.float("max_reading_range_temp")
    }

    pub fn physical_context(&self) -> Option<&'a str> {
        self.attrs.str("physical_context")
    }
}

/// Typed view over a chassis thermal resource.
pub struct Thermal {
    resource: Resource,
}

impl Thermal {
    pub fn new(
        conn: Arc<dyn Connector>,
        path: impl Into<String>,
        redfish_version: impl Into<String>,
        policy: FetchPolicy,
    ) -> Result<Self> {
        let resource = Resource::new(conn, path, redfish_version, schema(), policy)?;
        Ok(Self { resource })
    }

    pub fn from_resource(resource: Resource) -> Self {
        Self { resource }
    }

    pub fn resource(&self) -> &Resource {
        &self.resource
    }

    pub fn ensure_fetched(&mut self) -> Result<&AttributeSet> {
        self.resource.ensure_fetched()
    }

    pub fn refresh(&mut self) -> Result<()> {
        self.resource.refresh()
    }

    pub fn identity(&self) -> Option<&str> {
        self.resource.attributes()?.str("identity")
    }

    pub fn name(&self) -> Option<&str> {
        self.resource.attributes()?.str("name")
    }

    pub fn fans(&self) -> Vec<Fan<'_>> {
        match self.resource.attributes() {
            Some(attrs) => attrs
                .nested_list("fans")
                .iter()
                .map(|attrs| Fan { attrs })
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn temperatures(&self) -> Vec<Temperature<'_>> {
        match self.resource.attributes() {
            Some(attrs) => attrs
                .nested_list("temperatures")
                .iter()
                .map(|attrs| Temperature { attrs })
                .collect(),
            None => Vec::new(),
        }
    }
}
