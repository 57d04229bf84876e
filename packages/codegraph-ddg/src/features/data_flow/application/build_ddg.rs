use crate::config::DDGConfig;
use crate::errors::Result;
use crate::features::data_flow::infrastructure::DataDependenceGraph;
use crate::features::data_flow::ports::DDGAnalyzer;
use crate::features::flow_graph::ports::ControlFlowGraph;

pub struct BuildDDGUseCase<A: DDGAnalyzer> {
    analyzer: A,
    config: DDGConfig,
}

impl<A: DDGAnalyzer> BuildDDGUseCase<A> {
    pub fn new(analyzer: A, config: DDGConfig) -> Self {
        Self { analyzer, config }
    }

    pub fn config(&self) -> &DDGConfig {
        &self.config
    }

    pub fn execute<G: ControlFlowGraph>(&self, cfg: &G) -> Result<DataDependenceGraph> {
        self.analyzer.build_ddg(cfg, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Preset, WorklistStrategy};
    use crate::features::data_flow::domain::{Action, CodeLocation};
    use crate::features::data_flow::ports::FixpointDDGAnalyzer;
    use crate::features::flow_graph::domain::ExecutionState;
    use crate::features::flow_graph::infrastructure::InMemoryCfg;

    #[test]
    fn test_execute_with_preset() {
        let mut cfg = InMemoryCfg::new(0x400000);
        let n1 = cfg.add_block_with_states(
            0x400000,
            vec![ExecutionState::jump(
                0x400010,
                vec![Action::mem_write(CodeLocation::statement(0x400000, 3), 0x601000, 8)],
            )],
        );
        let n2 = cfg.add_block_with_states(
            0x400010,
            vec![ExecutionState::jump(
                0x400020,
                vec![Action::mem_read(CodeLocation::statement(0x400010, 1), 0x601000, 8)],
            )],
        );
        let n3 = cfg.add_block(0x400020);
        cfg.add_edge(n1, n2);
        cfg.add_edge(n2, n3);

        let usecase = BuildDDGUseCase::new(
            FixpointDDGAnalyzer,
            DDGConfig::from_preset(Preset::Fast),
        );
        assert_eq!(usecase.config().worklist, WorklistStrategy::DirectSuccessors);

        let ddg = usecase.execute(&cfg).unwrap();
        assert_eq!(
            ddg.predecessors(&CodeLocation::statement(0x400010, 1)),
            vec![&CodeLocation::statement(0x400000, 3)]
        );
    }
}
