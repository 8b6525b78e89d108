//! Performance benchmarks for the Discount Engine.
//!
//! Measures single rule application and configured rule sequences over
//! carts of increasing size.
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;

use discount_engine::calculation::DiscountEngine;
use discount_engine::config::ConfigLoader;
use discount_engine::models::{LineItem, ShoppingCart, UserType};

/// Builds a cart with `item_count` line items spread across categories.
fn create_cart(item_count: usize, user_type: UserType) -> ShoppingCart {
    let categories = ["clothing", "electronics", "books", "garden"];

    let mut cart = ShoppingCart::new(user_type);
    for i in 0..item_count {
        cart = cart.with_item(
            LineItem::new()
                .with_item_id(1000 + i as u64)
                .with_category(categories[i % categories.len()])
                .with_price(Decimal::new(1999 + i as i64 * 100, 2))
                .with_quantity((i % 8) as u32 + 1),
        );
    }
    cart
}

fn create_engine() -> DiscountEngine {
    DiscountEngine::new(Decimal::new(1, 1), Decimal::new(50, 0)).expect("valid engine")
}

/// Benchmark: Default percentage rule on a small cart.
fn bench_percentage_discount(c: &mut Criterion) {
    let engine = create_engine();
    let template = create_cart(4, UserType::Premium);

    c.bench_function("percentage_discount", |b| {
        b.iter(|| {
            let mut cart = template.clone();
            black_box(engine.apply_discount(&mut cart).unwrap())
        })
    });
}

/// Benchmark: Item-level rules across cart sizes.
fn bench_item_rules_scaling(c: &mut Criterion) {
    let engine = create_engine();
    let on_sale: Vec<u64> = (1000..1100).step_by(3).collect();

    let mut group = c.benchmark_group("item_rules");

    for item_count in [1usize, 10, 100, 1000] {
        let template = create_cart(item_count, UserType::Regular);

        group.throughput(Throughput::Elements(item_count as u64));
        group.bench_with_input(
            BenchmarkId::new("items", item_count),
            &item_count,
            |b, _| {
                b.iter(|| {
                    let mut cart = template.clone();
                    engine
                        .apply_bulk_discount(&mut cart, 5, Decimal::new(1, 1))
                        .unwrap();
                    engine
                        .apply_category_discount(&mut cart, "clothing", Decimal::new(2, 1))
                        .unwrap();
                    engine
                        .apply_flash_sale_discount(&mut cart, Decimal::new(2, 1), &on_sale)
                        .unwrap();
                    black_box(cart)
                })
            },
        );
    }

    group.finish();
}

/// Benchmark: The rule sequence from the bundled configuration.
fn bench_configured_rules(c: &mut Criterion) {
    let loader = ConfigLoader::load("./config/discounts.yaml").expect("Failed to load config");
    let engine = loader.engine().expect("valid engine");
    let template = create_cart(50, UserType::Loyal);

    c.bench_function("configured_rules_50_items", |b| {
        b.iter(|| {
            let mut cart = template.clone();
            black_box(engine.apply_rules(&mut cart, loader.rules()).unwrap())
        })
    });
}

criterion_group!(
    benches,
    bench_percentage_discount,
    bench_item_rules_scaling,
    bench_configured_rules,
);
criterion_main!(benches);
