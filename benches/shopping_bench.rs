// ABOUTME: Criterion benchmarks for shopping list grouping and summary derivation
// ABOUTME: Measures the per-read cost of rebuilding the category view from the flat list
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PlateIt Contributors

//! Criterion benchmarks for the shopping list view.
//!
//! The grouped view is derived on every read, so its cost scales with the
//! flat list. Sizes cover a single recipe up to a long weekly shop.

#![allow(
    clippy::missing_docs_in_private_items,
    clippy::unwrap_used,
    missing_docs
)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use plateit_core::models::{Ingredient, IngredientCategory, Recipe};
use plateit_server::shopping::{group_by_category, ShoppingList, ShoppingListSummary};

const CATEGORIES: [IngredientCategory; 5] = [
    IngredientCategory::Produce,
    IngredientCategory::Dairy,
    IngredientCategory::Meat,
    IngredientCategory::Pantry,
    IngredientCategory::Other,
];

/// Deterministic recipe with `ingredients` lines spread across all categories
fn recipe(id: usize, ingredients: usize) -> Recipe {
    Recipe {
        id: format!("bench-{id}"),
        title: format!("Bench recipe {id}"),
        description: String::new(),
        prep_time: "10 min".to_owned(),
        servings: "2".to_owned(),
        image_url: None,
        source_url: None,
        ingredients: (0..ingredients)
            .map(|i| {
                Ingredient::new(
                    format!("Item {id}-{i}"),
                    "1",
                    CATEGORIES[(id + i) % CATEGORIES.len()],
                )
            })
            .collect(),
        instructions: Vec::new(),
        tags: Vec::new(),
        created_at: 0,
    }
}

/// List built from `recipes` recipes of 10 ingredients, every third entry checked
fn list_with(recipes: usize) -> ShoppingList {
    let mut list = ShoppingList::new();
    for id in 0..recipes {
        list.add_recipe(&recipe(id, 10));
    }
    for index in (0..list.len()).step_by(3) {
        list.toggle_at(index).unwrap();
    }
    list
}

fn bench_grouping(c: &mut Criterion) {
    let mut group = c.benchmark_group("group_by_category");

    for recipes in [1_usize, 10, 50] {
        let list = list_with(recipes);
        group.throughput(Throughput::Elements(list.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(list.len()), &list, |b, list| {
            b.iter(|| group_by_category(black_box(list.entries())));
        });
    }

    group.finish();
}

fn bench_summary(c: &mut Criterion) {
    let mut group = c.benchmark_group("shopping_summary");

    for recipes in [1_usize, 10, 50] {
        let list = list_with(recipes);
        group.throughput(Throughput::Elements(list.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(list.len()), &list, |b, list| {
            b.iter(|| ShoppingListSummary::derive(black_box(list.entries())));
        });
    }

    group.finish();
}

fn bench_summary_serialization(c: &mut Criterion) {
    let list = list_with(10);
    let summary = list.summary();
    let serialized = serde_json::to_string(&summary).unwrap();

    let mut group = c.benchmark_group("serialize_summary");
    group.throughput(Throughput::Bytes(serialized.len() as u64));
    group.bench_function("100_entries", |b| {
        b.iter(|| serde_json::to_string(black_box(&summary)).unwrap());
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_grouping,
    bench_summary,
    bench_summary_serialization
);
criterion_main!(benches);
