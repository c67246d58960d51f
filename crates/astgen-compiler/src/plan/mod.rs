//! Target-independent emission plans.
//!
//! Each emitter is a pure function of the frozen schema. The plans capture
//! every decision that must agree across output files (method names, the
//! any-node alias, dispatch order, fold rules), so a renderer only has to
//! spell them in its target language.

pub mod codec;
pub mod data;
pub mod director;
pub mod naming;
pub mod path;
pub mod reducers;


use astgen_core::Schema;

pub use codec::{CodecEntry, CodecLeaf, CodecPlan, Decoder, DecoderBody};
pub use data::{DataPlan, EnumEntry, Field, NodeEntry};
pub use director::{DispatchBody, DispatchCase, DispatchMethod, DirectorPlan, LeafArg};
pub use naming::{any_node_name, shape_name};
pub use path::{Accessor, PathPlan};
pub use reducers::{LeafReducer, ReducerPlan, StateParam};

use crate::Config;

/// Every plan for one schema.
#[derive(Clone, Debug, PartialEq)]
pub struct Plans {
    pub data: DataPlan,
    pub director: DirectorPlan,
    pub reducers: ReducerPlan,
    pub codec: CodecPlan,
    pub paths: PathPlan,
}

impl Plans {
    pub fn build(schema: &Schema, config: &Config) -> Self {
        let data = DataPlan::build(schema);
        let director = DirectorPlan::build(schema, config, &data.any_node);
        let reducers = ReducerPlan::build(schema, &director);
        let codec = CodecPlan::build(schema, &data.any_node);
        let paths = PathPlan::build(schema);

        tracing::debug!(
            nodes = data.nodes.len(),
            methods = director.methods.len(),
            reducers = reducers.leaves.len(),
            decoders = codec.decoders.len(),
            accessors = paths.accessors.len(),
            "planned emission"
        );

        Self {
            data,
            director,
            reducers,
            codec,
            paths,
        }
    }
}
