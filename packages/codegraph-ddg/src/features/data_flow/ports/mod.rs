use crate::config::DDGConfig;
use crate::errors::Result;
use crate::features::data_flow::infrastructure::{DDGBuilder, DataDependenceGraph};
use crate::features::flow_graph::ports::ControlFlowGraph;

pub trait DDGAnalyzer: Send + Sync {
    fn build_ddg<G: ControlFlowGraph>(
        &self,
        cfg: &G,
        config: &DDGConfig,
    ) -> Result<DataDependenceGraph>;
}

/// Worklist-fixpoint analyzer
#[derive(Debug, Clone, Copy, Default)]
pub struct FixpointDDGAnalyzer;

impl DDGAnalyzer for FixpointDDGAnalyzer {
    fn build_ddg<G: ControlFlowGraph>(
        &self,
        cfg: &G,
        config: &DDGConfig,
    ) -> Result<DataDependenceGraph> {
        DDGBuilder::new(cfg, config.clone()).build()
    }
}
