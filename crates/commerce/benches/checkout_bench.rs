use commerce::{CartService, OrderService};
use common::UserId;
use criterion::{Criterion, criterion_group, criterion_main};
use domain::{Money, Product, StatusPolicy};
use store::{CartStore, Catalog, OrderStore};

fn bench_checkout_single_line(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    c.bench_function("commerce/checkout_single_line", |b| {
        b.iter(|| {
            rt.block_on(async {
                let catalog = Catalog::new();
                let cart_store = CartStore::new();
                let carts = CartService::new(catalog.clone(), cart_store.clone());
                let orders = OrderService::new(
                    catalog.clone(),
                    cart_store,
                    OrderStore::new(),
                    StatusPolicy::default(),
                );

                let product =
                    Product::new("Bench Widget", None, None, Money::from_cents(1000), 10).unwrap();
                let product_id = product.id;
                catalog.insert(product).await;

                let user = UserId::new();
                carts.add(user, product_id, 2).await.unwrap();
                orders.checkout(user).await.unwrap();
            });
        });
    });
}

fn bench_checkout_20_lines(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    c.bench_function("commerce/checkout_20_lines", |b| {
        b.iter(|| {
            rt.block_on(async {
                let catalog = Catalog::new();
                let cart_store = CartStore::new();
                let carts = CartService::new(catalog.clone(), cart_store.clone());
                let orders = OrderService::new(
                    catalog.clone(),
                    cart_store,
                    OrderStore::new(),
                    StatusPolicy::default(),
                );

                let user = UserId::new();
                for i in 0..20i64 {
                    let product = Product::new(
                        format!("Product {i}"),
                        None,
                        None,
                        Money::from_cents(100 * (i + 1)),
                        5,
                    )
                    .unwrap();
                    let product_id = product.id;
                    catalog.insert(product).await;
                    carts.add(user, product_id, 1).await.unwrap();
                }
                orders.checkout(user).await.unwrap();
            });
        });
    });
}

fn bench_stock_reservation(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let catalog = Catalog::new();
    let product = Product::new("Hot Item", None, None, Money::from_cents(500), u32::MAX).unwrap();
    let product_id = product.id;
    rt.block_on(catalog.insert(product));

    c.bench_function("commerce/try_reserve", |b| {
        b.iter(|| {
            rt.block_on(async {
                catalog.try_reserve(product_id, 1).await.unwrap();
            });
        });
    });
}

criterion_group!(
    benches,
    bench_checkout_single_line,
    bench_checkout_20_lines,
    bench_stock_reservation,
);
criterion_main!(benches);
