//! Timeouts for actions: `invoke`

use crate::schema::{timeouts_attribute, timeouts_block, TimeoutField};
use crate::{TimeoutsType, INVOKE};
use std::sync::Arc;
use std::time::Duration;
use tfplug::schema::{Attribute, CustomType, NestedBlock};
use tfplug::types::Diagnostics;

define_timeouts_kind!("action");

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Opts {
    pub invoke_description: Option<String>,
}

impl Opts {
    pub fn with_invoke_description(mut self, description: impl Into<String>) -> Self {
        self.invoke_description = Some(description.into());
        self
    }

    fn fields(&self) -> [TimeoutField<'_>; 1] {
        [(INVOKE, self.invoke_description.as_deref())]
    }
}

fn timeouts_type() -> Arc<dyn CustomType> {
    Arc::new(Type(TimeoutsType::for_timeouts([INVOKE])))
}

/// Single nested `timeouts` block with an `invoke` timeout
pub fn block() -> NestedBlock {
    block_with_opts(&Opts::default())
}

pub fn block_with_opts(opts: &Opts) -> NestedBlock {
    timeouts_block(&opts.fields(), Some(timeouts_type()))
}

/// Optional single nested `timeouts` attribute with an `invoke` timeout
pub fn attributes() -> Attribute {
    attributes_with_opts(&Opts::default())
}

pub fn attributes_with_opts(opts: &Opts) -> Attribute {
    timeouts_attribute(&opts.fields(), Some(timeouts_type()))
}

impl Value {
    pub fn invoke(&self, default: Duration) -> (Duration, Diagnostics) {
        self.timeout(INVOKE, default)
    }
}
