// Criterion benchmarks for devmatch

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use devmatch::core::{compute_score, Recommender};
use devmatch::models::{CandidateFilter, Level, Match, MatchProfile};

const LANGUAGES: &[&str] = &[
    "JavaScript", "Python", "Rust", "Go", "Java", "C", "C++", "C#", "Ruby", "Kotlin",
    "Swift", "TypeScript", "Haskell", "Elixir", "Scala", "PHP",
];

fn create_candidate(id: usize) -> MatchProfile {
    let mut profile = MatchProfile::new(id.to_string());
    profile.programming_language = (0..(id % 5) + 1)
        .map(|i| LANGUAGES[(id + i * 3) % LANGUAGES.len()].to_string())
        .collect();
    profile.level = match id % 3 {
        0 => Level::Beginner,
        1 => Level::Intermediate,
        _ => Level::Advanced,
    };
    profile.location = if id % 2 == 0 { "Boston" } else { "Denver" }.to_string();
    profile.is_active = id % 7 != 0;
    profile
}

fn create_subject() -> MatchProfile {
    let mut subject = MatchProfile::new("current_user");
    subject.programming_language = vec!["Rust".to_string(), "Python".to_string(), "Go".to_string()];
    subject.preferences.preferred_languages = vec!["Haskell".to_string(), "Rust".to_string()];
    subject
}

fn bench_compute_score(c: &mut Criterion) {
    let subject = create_subject();
    let candidate = create_candidate(4);

    c.bench_function("compute_score", |b| {
        b.iter(|| compute_score(black_box(&subject), black_box(&candidate)));
    });
}

fn bench_recommend(c: &mut Criterion) {
    let recommender = Recommender::default();
    let subject = create_subject();
    let no_matches: Vec<Match> = Vec::new();

    let mut group = c.benchmark_group("recommend");

    for candidate_count in [10, 100, 1000, 10000].iter() {
        let candidates: Vec<MatchProfile> = (0..*candidate_count).map(create_candidate).collect();

        group.bench_with_input(
            BenchmarkId::new("recommend", candidate_count),
            candidate_count,
            |b, _| {
                b.iter(|| {
                    recommender.recommend(
                        black_box(&subject),
                        black_box(candidates.clone()),
                        black_box(no_matches.as_slice()),
                    )
                });
            },
        );
    }

    group.finish();
}

fn bench_filtered_recommend(c: &mut Criterion) {
    let recommender = Recommender::default();
    let subject = create_subject();
    let candidates: Vec<MatchProfile> = (0..1000).map(create_candidate).collect();
    let no_matches: Vec<Match> = Vec::new();
    let filter = CandidateFilter {
        level: Some(Level::Advanced),
        location: Some("boston".to_string()),
        ..Default::default()
    };

    c.bench_function("filtered_recommend_1000_candidates", |b| {
        b.iter(|| {
            recommender.recommend_filtered(
                black_box(&subject),
                black_box(candidates.clone()),
                black_box(no_matches.as_slice()),
                black_box(&filter),
            )
        });
    });
}

criterion_group!(benches, bench_compute_score, bench_recommend, bench_filtered_recommend);

criterion_main!(benches);
