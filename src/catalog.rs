//! Static product catalog used by order creation for lookup and price
//! snapshots. Presentational catalog content (descriptions, ratings, badges)
//! lives in the storefront frontend, not here.

use rust_decimal::Decimal;
use std::sync::OnceLock;

#[derive(Debug, Clone, PartialEq)]
pub struct Variant {
    pub id: &'static str,
    pub label: &'static str,
    pub price: Decimal,
    pub msrp: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub slug: &'static str,
    pub title: &'static str,
    pub variants: Vec<Variant>,
}

pub const SLUG_LEVEL_BOOST: &str = "level-boost";
pub const SLUG_RANKED_BOOST: &str = "ranked-boost";
pub const SLUG_V_BUCKS: &str = "v-bucks";
pub const SLUG_WIN_BOOST: &str = "win-boost";

fn usd(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

fn variant(id: &'static str, label: &'static str, price_cents: i64, msrp_cents: i64) -> Variant {
    Variant {
        id,
        label,
        price: usd(price_cents),
        msrp: usd(msrp_cents),
    }
}

fn build_catalog() -> Vec<Product> {
    vec![
        Product {
            slug: SLUG_LEVEL_BOOST,
            title: "Fortnite Level Boost",
            variants: vec![
                variant("lvl-10", "10 Levels", 900, 1500),
                variant("lvl-25", "25 Levels", 1900, 3000),
                variant("lvl-50", "50 Levels", 3500, 6000),
                variant("lvl-100", "100 Levels", 6500, 12000),
            ],
        },
        Product {
            slug: SLUG_RANKED_BOOST,
            title: "Fortnite Ranked Boost",
            variants: vec![
                variant("rank-bronze-gold", "Bronze \u{2192} Gold", 1500, 2500),
                variant("rank-gold-plat", "Gold \u{2192} Platinum", 2500, 4000),
                variant("rank-plat-diamond", "Platinum \u{2192} Diamond", 4500, 7000),
                variant("rank-diamond-elite", "Diamond \u{2192} Elite", 6500, 9500),
            ],
        },
        Product {
            slug: SLUG_V_BUCKS,
            title: "Fortnite V-Bucks",
            variants: vec![
                variant("1000", "1000 V-Bucks", 600, 899),
                variant("2000", "2000 V-Bucks", 1100, 1798),
                variant("2800", "2800 V-Bucks", 1600, 2299),
                variant("5000", "5000 V-Bucks", 2500, 3699),
                variant("10000", "10000 V-Bucks", 4500, 7398),
                variant("13500", "13500 V-Bucks", 6500, 8999),
                variant("27000", "27000 V-Bucks", 11000, 17998),
                variant("54000", "54000 V-Bucks", 20000, 35996),
                variant("crew-1m", "Fortnite Crew - 1 Month", 700, 1199),
            ],
        },
        Product {
            slug: SLUG_WIN_BOOST,
            title: "Fortnite Win Boost",
            variants: vec![variant("win-boost", "Win Boost", 0, 0)],
        },
    ]
}

/// Process-wide catalog, built once.
pub fn products() -> &'static [Product] {
    static PRODUCTS: OnceLock<Vec<Product>> = OnceLock::new();
    PRODUCTS.get_or_init(build_catalog)
}

/// Look up a product and one of its variants by slug and variant id.
pub fn find_variant(product_slug: &str, variant_id: &str) -> Option<(&'static Product, &'static Variant)> {
    let product = products().iter().find(|p| p.slug == product_slug)?;
    let variant = product.variants.iter().find(|v| v.id == variant_id)?;
    Some((product, variant))
}
