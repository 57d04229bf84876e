//! Performance benchmarks for DDG construction
//!
//! - Straight-line chains: one pass, no re-enqueue
//! - Diamond ladders: every join grows its snapshot twice
//! - Worklist strategy comparison on the same ladder

use codegraph_ddg::config::{DDGConfig, WorklistStrategy};
use codegraph_ddg::{Action, CodeLocation, DataDependenceGraph, ExecutionState, InMemoryCfg};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

const REGS: u64 = 8;

fn block_actions(addr: u64) -> Vec<Action> {
    let mut actions = Vec::new();
    for r in 0..REGS {
        let offset = 16 + r * 8;
        actions.push(Action::reg_read(
            CodeLocation::statement(addr, r as usize * 2),
            offset,
            8,
        ));
        actions.push(Action::reg_write(
            CodeLocation::statement(addr, r as usize * 2 + 1),
            offset,
            8,
        ));
    }
    actions.push(Action::mem_write(
        CodeLocation::statement(addr, REGS as usize * 2),
        0x8000 + (addr & 0xff0),
        8,
    ));
    actions
}

/// n blocks in a line
fn chain_cfg(n: u64) -> InMemoryCfg {
    let mut cfg = InMemoryCfg::new(0x1000);
    let mut prev = None;
    for i in 0..=n {
        let addr = 0x1000 + i * 0x10;
        let states = if i < n {
            vec![ExecutionState::jump(addr + 0x10, block_actions(addr))]
        } else {
            Vec::new()
        };
        let node = cfg.add_block_with_states(addr, states);
        if let Some(p) = prev {
            cfg.add_edge(p, node);
        }
        prev = Some(node);
    }
    cfg
}

/// n stacked diamonds: head → {left, right} → next head
fn diamond_ladder_cfg(n: u64) -> InMemoryCfg {
    let head = |i: u64| 0x1000 + i * 0x100;
    let mut cfg = InMemoryCfg::new(head(0));
    let mut heads = Vec::new();

    for i in 0..=n {
        let h = head(i);
        let states = if i < n {
            vec![
                ExecutionState::jump(h + 0x10, block_actions(h)),
                ExecutionState::jump(h + 0x20, block_actions(h)),
            ]
        } else {
            Vec::new()
        };
        heads.push(cfg.add_block_with_states(h, states));
    }

    for i in 0..n {
        let h = head(i);
        for arm in [h + 0x10, h + 0x20] {
            let node = cfg.add_block_with_states(
                arm,
                vec![ExecutionState::jump(head(i + 1), block_actions(arm))],
            );
            cfg.add_edge(heads[i as usize], node);
            cfg.add_edge(node, heads[i as usize + 1]);
        }
    }

    cfg
}

fn bench_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("chain");

    for n in [16u64, 64, 256] {
        let cfg = chain_cfg(n);
        group.throughput(Throughput::Elements(n));
        group.bench_with_input(BenchmarkId::from_parameter(n), &cfg, |b, cfg| {
            b.iter(|| {
                let ddg = DataDependenceGraph::build(black_box(cfg), DDGConfig::default());
                black_box(ddg)
            });
        });
    }

    group.finish();
}

fn bench_diamond_ladder(c: &mut Criterion) {
    let mut group = c.benchmark_group("diamond_ladder");

    for n in [8u64, 32] {
        let cfg = diamond_ladder_cfg(n);
        for strategy in [WorklistStrategy::Transitive, WorklistStrategy::DirectSuccessors] {
            let config = DDGConfig::default().worklist(strategy);
            group.bench_with_input(
                BenchmarkId::new(format!("{:?}", strategy), n),
                &cfg,
                |b, cfg| {
                    b.iter(|| {
                        let ddg = DataDependenceGraph::build(black_box(cfg), config.clone());
                        black_box(ddg)
                    });
                },
            );
        }
    }

    group.finish();
}

fn bench_retain_data(c: &mut Criterion) {
    let cfg = diamond_ladder_cfg(16);
    c.bench_function("retain_data", |b| {
        b.iter(|| {
            let ddg =
                DataDependenceGraph::build(black_box(&cfg), DDGConfig::default().retain_data(true));
            black_box(ddg)
        });
    });
}

criterion_group!(benches, bench_chain, bench_diamond_ladder, bench_retain_data);
criterion_main!(benches);
