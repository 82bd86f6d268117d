use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use battle_timeline::cards::{Card, Priority};
use battle_timeline::core::{CombatConfig, GameRng, Side, SideMap};
use battle_timeline::interrupts::{check_parry_trigger, setup_parry_ready};
use battle_timeline::timeline::{build_speed_timeline, create_fixed_order, AgilityModifier, QueueEntry};

fn hand(prefix: &str, len: usize) -> Vec<Card> {
    (0..len)
        .map(|i| {
            let priority = match i % 4 {
                0 => Priority::Instant,
                1 => Priority::Quick,
                2 => Priority::Normal,
                _ => Priority::Slow,
            };
            Card::attack(format!("{prefix}{i}"), format!("{prefix}{i}"), (i % 6) as i64 + 1, 3)
                .with_priority(priority)
        })
        .collect()
}

fn bench_speed_timeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_speed_timeline");
    for len in [5usize, 20, 100] {
        let player = hand("p", len);
        let enemy = hand("e", len);
        group.bench_with_input(BenchmarkId::from_parameter(len), &len, |b, _| {
            let mut rng = GameRng::new(7);
            b.iter(|| build_speed_timeline(black_box(&player), black_box(&enemy), 1_000, &mut rng));
        });
    }
    group.finish();
}

fn bench_fixed_order(c: &mut Criterion) {
    let player = hand("p", 20);
    let enemy = hand("e", 20);
    let agility = SideMap::from_values(1, 2);
    c.bench_function("create_fixed_order/20", |b| {
        b.iter(|| create_fixed_order(black_box(&player), black_box(&enemy), &agility, &AgilityModifier));
    });
}

fn bench_parry_resort(c: &mut Criterion) {
    let config = CombatConfig::default().with_max_speed(1_000).with_parry_out_threshold(1_000);
    let mut group = c.benchmark_group("check_parry_trigger");
    for len in [10usize, 50, 200] {
        let enemy = hand("e", len);
        let mut queue = create_fixed_order(&[], &enemy, &SideMap::default(), &AgilityModifier);
        let guard = QueueEntry::new(
            Side::Player,
            Card::defense("parry", "Parry", 1, 0).with_parry(1_000, 4),
            0,
            0,
        );
        queue.insert(0, guard.clone());
        let states = vec![setup_parry_ready(&guard, &config)];

        group.bench_with_input(BenchmarkId::from_parameter(len), &len, |b, _| {
            b.iter(|| check_parry_trigger(black_box(&queue), 1, &states, None, &config));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_speed_timeline, bench_fixed_order, bench_parry_resort);
criterion_main!(benches);
