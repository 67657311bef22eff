use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use praxis::{Action, Belief, Goal, Planner};

/// A linear chain: each action unlocks the next one's precondition.
fn chain_fixture(len: usize) -> (Vec<Arc<Action>>, Vec<Arc<Goal>>) {
    let beliefs: Vec<Arc<Belief>> = (0..len)
        .map(|i| Arc::new(Belief::new(format!("step_{i}"), || false)))
        .collect();

    let mut pool = vec![Arc::new(
        Action::builder("start")
            .effect(beliefs[0].clone())
            .build()
            .unwrap(),
    )];
    for i in 1..len {
        pool.push(Arc::new(
            Action::builder(format!("advance_{i}"))
                .precondition(beliefs[i - 1].clone())
                .effect(beliefs[i].clone())
                .build()
                .unwrap(),
        ));
    }

    let goal = Arc::new(
        Goal::builder("reach_end")
            .desired_effect(beliefs[len - 1].clone())
            .build()
            .unwrap(),
    );
    (pool, vec![goal])
}

/// A branchy pool: every step can be reached by several redundant actions,
/// which is what blows up the search tree in practice.
fn branching_fixture(width: usize, depth: usize) -> (Vec<Arc<Action>>, Vec<Arc<Goal>>) {
    let beliefs: Vec<Arc<Belief>> = (0..depth)
        .map(|i| Arc::new(Belief::new(format!("tier_{i}"), || false)))
        .collect();

    let mut pool = Vec::new();
    for (i, belief) in beliefs.iter().enumerate() {
        for j in 0..width {
            let mut builder = Action::builder(format!("tier{}_option{}", i, j))
                .cost(1.0 + j as f32)
                .effect(belief.clone());
            if i > 0 {
                builder = builder.precondition(beliefs[i - 1].clone());
            }
            pool.push(Arc::new(builder.build().unwrap()));
        }
    }

    let goal = Arc::new(
        Goal::builder("reach_top")
            .desired_effect(beliefs[depth - 1].clone())
            .build()
            .unwrap(),
    );
    (pool, vec![goal])
}

fn bench_plan(c: &mut Criterion) {
    let planner = Planner::new();

    let (pool, goals) = chain_fixture(12);
    c.bench_function("plan_chain_12", |b| {
        b.iter(|| {
            planner
                .plan(black_box(&pool), black_box(&goals), None)
                .unwrap()
        })
    });

    let (pool, goals) = branching_fixture(3, 5);
    c.bench_function("plan_branching_3x5", |b| {
        b.iter(|| {
            planner
                .plan(black_box(&pool), black_box(&goals), None)
                .unwrap()
        })
    });
}

criterion_group!(benches, bench_plan);
criterion_main!(benches);
