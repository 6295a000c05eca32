//! Sample catalog inserted by `wisteria-app seed`.

use wisteria_app::domain::products::{ProductCategory, ProductCondition};

pub(super) struct SeedProduct {
    pub name: &'static str,
    pub slug: &'static str,
    pub description: &'static str,
    pub price_cents: i64,
    pub condition: ProductCondition,
    pub category: ProductCategory,
    pub image_url: &'static str,
    pub is_available: bool,
    pub quantity: i64,
}

pub(super) const SAMPLE_PRODUCTS: [SeedProduct; 10] = [
    SeedProduct {
        name: "Hatsune Miku Nendoroid #33",
        slug: "hatsune-miku-nendoroid-33",
        description: "The iconic Hatsune Miku in her classic outfit. Nendoroid #33, one of the \
                      figures that started the Nendoroid craze. Comes with multiple face plates \
                      and accessories.",
        price_cents: 4500,
        condition: ProductCondition::LikeNew,
        category: ProductCategory::Nendoroid,
        image_url: "https://images.unsplash.com/photo-1608889175123-8ee362201f81?w=600",
        is_available: true,
        quantity: 1,
    },
    SeedProduct {
        name: "Rem 1/7 Scale Figure",
        slug: "rem-1-7-scale-figure",
        description: "Rem from Re:Zero in her maid outfit. Beautifully detailed 1/7 scale figure \
                      with flowing hair and dynamic pose. Approximately 23cm tall.",
        price_cents: 18900,
        condition: ProductCondition::New,
        category: ProductCategory::ScaleFigure,
        image_url: "https://images.unsplash.com/photo-1613769049987-b31b641f25b1?w=600",
        is_available: true,
        quantity: 1,
    },
    SeedProduct {
        name: "Pochacco Fluffy Plush",
        slug: "pochacco-fluffy-plush",
        description: "Adorable oversized Pochacco plush from Sanrio. Super soft and huggable. \
                      Approximately 30cm tall. Perfect for collectors and cuddlers alike.",
        price_cents: 3200,
        condition: ProductCondition::New,
        category: ProductCategory::Plush,
        image_url: "https://images.unsplash.com/photo-1559715541-5daf8a0296d0?w=600",
        is_available: true,
        quantity: 1,
    },
    SeedProduct {
        name: "Sailor Moon Crystal Figuarts",
        slug: "sailor-moon-crystal-figuarts",
        description: "Sailor Moon from the Crystal series. S.H.Figuarts articulated figure with \
                      multiple hand parts and Moon Stick accessory. Incredibly poseable.",
        price_cents: 7800,
        condition: ProductCondition::Used,
        category: ProductCategory::ScaleFigure,
        image_url: "https://images.unsplash.com/photo-1558618666-fcd25c85f82e?w=600",
        is_available: true,
        quantity: 1,
    },
    SeedProduct {
        name: "Jujutsu Kaisen Gojo Nendoroid",
        slug: "jujutsu-kaisen-gojo-nendoroid",
        description: "Satoru Gojo Nendoroid with blindfold and sunglasses face plates. Includes \
                      Hollow Purple effect part and Domain Expansion hand gesture.",
        price_cents: 5500,
        condition: ProductCondition::New,
        category: ProductCategory::Nendoroid,
        image_url: "https://images.unsplash.com/photo-1601850494422-3cf14624b0b3?w=600",
        is_available: true,
        quantity: 1,
    },
    SeedProduct {
        name: "Studio Ghibli Totoro Keychain Set",
        slug: "studio-ghibli-totoro-keychain-set",
        description: "Set of 3 miniature Totoro keychains: Big Totoro, Medium Totoro and Small \
                      Totoro. Officially licensed Studio Ghibli merchandise.",
        price_cents: 1800,
        condition: ProductCondition::New,
        category: ProductCategory::Goods,
        image_url: "https://images.unsplash.com/photo-1609372332255-611485350f25?w=600",
        is_available: true,
        quantity: 1,
    },
    SeedProduct {
        name: "Evangelion Unit-01 1/4 Scale",
        slug: "evangelion-unit-01-1-4-scale",
        description: "Massive 1/4 scale Evangelion Unit-01 figure. LED eyes, incredible paint \
                      detail. A true centerpiece for any collection. Approximately 45cm tall.",
        price_cents: 42000,
        condition: ProductCondition::LikeNew,
        category: ProductCategory::ScaleFigure,
        image_url: "https://images.unsplash.com/photo-1531259683007-016a7b628fc3?w=600",
        is_available: true,
        quantity: 1,
    },
    SeedProduct {
        name: "Spy x Family Anya Nendoroid",
        slug: "spy-x-family-anya-nendoroid",
        description: "Anya Forger with her signature smug face plate and peanut accessory. Also \
                      includes Chimera-san plush accessory and school uniform body.",
        price_cents: 4800,
        condition: ProductCondition::New,
        category: ProductCategory::Nendoroid,
        image_url: "https://images.unsplash.com/photo-1640006709862-b864e5e3e31e?w=600",
        is_available: true,
        quantity: 1,
    },
    SeedProduct {
        name: "Kirby Dream Land Plush Collection",
        slug: "kirby-dream-land-plush-collection",
        description: "Extra soft Kirby plush from the Dream Land collection. Features the classic \
                      pink puffball in his iconic round shape. Approximately 20cm.",
        price_cents: 2800,
        condition: ProductCondition::LikeNew,
        category: ProductCategory::Plush,
        image_url: "https://images.unsplash.com/photo-1566576912321-d58ddd7a6088?w=600",
        is_available: false,
        quantity: 0,
    },
    SeedProduct {
        name: "Demon Slayer Tanjiro Acrylic Stand",
        slug: "demon-slayer-tanjiro-acrylic-stand",
        description: "High-quality acrylic stand featuring Tanjiro Kamado in his Water Breathing \
                      pose. Approximately 15cm tall. Officially licensed.",
        price_cents: 1500,
        condition: ProductCondition::New,
        category: ProductCategory::Goods,
        image_url: "https://images.unsplash.com/photo-1578632767115-351597cf2477?w=600",
        is_available: true,
        quantity: 1,
    },
];
