//! Performance benchmarks for Crewplan.
//!
//! This module contains benchmarks for:
//! - Roster persistence (load, save, migration pass)
//! - Team overview aggregation with growing rosters
//! - Prompt template formatting
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use crewplan::ai::prompts;
use crewplan::team::{Experience, MemberProfile, Roster, RosterStore, TeamOverview};

// ============================================================================
// Mock Data Fixtures
// ============================================================================

mod fixtures {
    use super::*;

    const SKILL_POOL: &[&str] = &[
        "Rust",
        "Python",
        "SQL",
        "TypeScript",
        "Go",
        "Kubernetes",
        "React",
        "Terraform",
        "GraphQL",
        "PostgreSQL",
    ];

    /// Generate a roster with `n` members drawing from a fixed skill pool.
    pub fn roster(n: usize) -> Roster {
        let mut roster = Roster::new();
        for i in 0..n {
            let skills = (0..=(i % 4))
                .map(|j| SKILL_POOL[(i + j) % SKILL_POOL.len()].to_string())
                .collect();
            let experience = Experience::ALL[i % Experience::ALL.len()];
            roster.insert(
                format!("Member {i:04}"),
                MemberProfile::new(skills, experience)
                    .with_role("Engineer")
                    .with_availability(((i % 5) * 10) as u32),
            );
        }
        roster
    }

    /// Legacy-shaped roster JSON missing the role/availability fields.
    pub fn legacy_roster_json(n: usize) -> String {
        let entries: Vec<String> = (0..n)
            .map(|i| {
                format!(
                    r#""Member {i:04}": {{"skills": ["{}"], "experience": "Senior"}}"#,
                    SKILL_POOL[i % SKILL_POOL.len()]
                )
            })
            .collect();
        format!("{{{}}}", entries.join(","))
    }
}

// ============================================================================
// Roster Persistence
// ============================================================================

fn bench_roster_save_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("roster_persistence");

    for size in [10, 100, 500] {
        group.bench_with_input(BenchmarkId::new("save_load", size), &size, |b, &size| {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("team.json");
            let mut store = RosterStore::open(&path);
            for (name, profile) in fixtures::roster(size) {
                store.add(&name, profile).unwrap();
            }

            b.iter(|| {
                store.save().unwrap();
                let reloaded = RosterStore::open(&path);
                black_box(reloaded.len())
            });
        });
    }

    group.finish();
}

fn bench_migration_pass(c: &mut Criterion) {
    let mut group = c.benchmark_group("roster_migration");

    for size in [10, 500] {
        group.bench_with_input(BenchmarkId::new("migrate", size), &size, |b, &size| {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("team.json");

            b.iter(|| {
                std::fs::write(&path, fixtures::legacy_roster_json(size)).unwrap();
                let mut store = RosterStore::open(&path);
                black_box(store.migrate().unwrap())
            });
        });
    }

    group.finish();
}

// ============================================================================
// Overview Aggregation
// ============================================================================

fn bench_overview(c: &mut Criterion) {
    let mut group = c.benchmark_group("team_overview");

    for size in [10, 100, 500] {
        let roster = fixtures::roster(size);
        group.bench_with_input(BenchmarkId::new("from_roster", size), &roster, |b, roster| {
            b.iter(|| black_box(TeamOverview::from_roster(roster)));
        });
    }

    group.finish();
}

// ============================================================================
// Prompt Formatting
// ============================================================================

fn bench_prompt_templates(c: &mut Criterion) {
    let description = "Build a mobile banking application with budgeting, \
                       notifications, and multi-currency support."
        .repeat(4);
    let analysis = "1. Main objectives\n- Ship an MVP\n2. Key features\n- Budgets\n".repeat(16);
    let roster_json = serde_json::to_string_pretty(&fixtures::roster(50)).unwrap();

    c.bench_function("prompt_analyze", |b| {
        b.iter(|| black_box(prompts::analyze_project(black_box(&description))));
    });

    c.bench_function("prompt_create_tasks", |b| {
        b.iter(|| black_box(prompts::create_tasks(black_box(&analysis))));
    });

    c.bench_function("prompt_match_tasks", |b| {
        b.iter(|| {
            black_box(prompts::match_tasks_to_team(black_box(&analysis), black_box(&roster_json)))
        });
    });
}

criterion_group!(
    benches,
    bench_roster_save_load,
    bench_migration_pass,
    bench_overview,
    bench_prompt_templates
);
criterion_main!(benches);
