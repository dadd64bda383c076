//! Benchmarks for the tokenwind pipeline.

use std::fs;
use std::path::PathBuf;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use tokenwind::parser::{extract_candidates, Stylesheet};
use tokenwind::render::{CssRenderer, RenderOptions};
use tokenwind::types::{parse_animation_list, ThemeConfig};
use tokenwind::validation::{validate_config, validate_project, ProjectContext};

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

fn load_fixture(name: &str) -> String {
    fs::read_to_string(fixtures_dir().join(name)).unwrap()
}

// -- Parsing benchmarks --

fn bench_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing");

    let theme_source = load_fixture("theme.yaml");
    let css_source = load_fixture("stylesheet.css");
    let content_source = load_fixture("content.rs");
    let config = ThemeConfig::parse_yaml(&theme_source).unwrap();

    group.bench_function("parse_config", |b| {
        b.iter(|| ThemeConfig::parse_yaml(black_box(&theme_source)).unwrap())
    });

    group.bench_function("parse_stylesheet", |b| {
        b.iter(|| Stylesheet::parse(black_box(&css_source), &config.dark_mode).unwrap())
    });

    group.bench_function("parse_animation", |b| {
        b.iter(|| {
            parse_animation_list(black_box("pulse 2s cubic-bezier(0.4, 0, 0.6, 1) infinite"))
                .unwrap()
        })
    });

    group.bench_function("extract_candidates", |b| {
        b.iter(|| extract_candidates(black_box(&content_source)))
    });

    group.finish();
}

// -- Validation benchmarks --

fn bench_validation(c: &mut Criterion) {
    let mut group = c.benchmark_group("validation");

    let config = ThemeConfig::parse_yaml(&load_fixture("theme.yaml")).unwrap();
    let sheet = Stylesheet::parse(&load_fixture("stylesheet.css"), &config.dark_mode).unwrap();

    group.bench_function("validate_config", |b| {
        b.iter(|| validate_config(black_box(&config)))
    });

    group.bench_function("validate_with_stylesheet", |b| {
        let context = ProjectContext {
            scan: None,
            stylesheet: Some(&sheet),
        };
        b.iter(|| validate_project(black_box(&config), &context))
    });

    group.finish();
}

// -- Rendering benchmarks --

fn bench_rendering(c: &mut Criterion) {
    let mut group = c.benchmark_group("rendering");

    let config = ThemeConfig::parse_yaml(&load_fixture("theme.yaml")).unwrap();
    let candidates = extract_candidates(&load_fixture("content.rs"));
    let renderer = CssRenderer::new(&config);

    group.bench_function("render_pruned", |b| {
        b.iter(|| renderer.render(black_box(&RenderOptions::pruned(&candidates))))
    });

    group.bench_function("render_all", |b| {
        b.iter(|| renderer.render(black_box(&RenderOptions::all())))
    });

    group.bench_function("render_builtin_all", |b| {
        let builtin = ThemeConfig::builtin();
        b.iter(|| CssRenderer::new(black_box(&builtin)).render(&RenderOptions::all()))
    });

    group.finish();
}

criterion_group!(benches, bench_parsing, bench_validation, bench_rendering);
criterion_main!(benches);
