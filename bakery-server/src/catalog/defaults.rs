//! Platform default catalog
//!
//! Built once on first use and never mutated. Declaration order here is the
//! order every resolved catalog lists its default entries in.

use std::sync::LazyLock;

use shared::catalog::{
    AddonEntry, AddonPricing, CatalogCategory, FlatPriceEntry, ModifierEntry, SizeEntry,
    TreatEntry,
};

/// Default price lists for every category
#[derive(Debug)]
pub struct DefaultCatalog {
    pub sizes: Vec<SizeEntry>,
    pub shapes: Vec<ModifierEntry>,
    pub flavors: Vec<ModifierEntry>,
    pub frostings: Vec<ModifierEntry>,
    pub decorations: Vec<FlatPriceEntry>,
    pub delivery_options: Vec<FlatPriceEntry>,
    pub addons: Vec<AddonEntry>,
    pub treats: Vec<TreatEntry>,
}

impl DefaultCatalog {
    /// Whether `id` names a default entry of `category`
    pub fn contains(&self, category: CatalogCategory, id: &str) -> bool {
        fn has<E: shared::catalog::CatalogEntry>(entries: &[E], id: &str) -> bool {
            entries.iter().any(|e| e.id() == id)
        }

        match category {
            CatalogCategory::Sizes => has(&self.sizes, id),
            CatalogCategory::Shapes => has(&self.shapes, id),
            CatalogCategory::Flavors => has(&self.flavors, id),
            CatalogCategory::Frostings => has(&self.frostings, id),
            CatalogCategory::Decorations => has(&self.decorations, id),
            CatalogCategory::DeliveryOptions => has(&self.delivery_options, id),
            CatalogCategory::Addons => has(&self.addons, id),
            CatalogCategory::Treats => has(&self.treats, id),
        }
    }
}

static DEFAULTS: LazyLock<DefaultCatalog> = LazyLock::new(build);

/// The process-wide default catalog
pub fn default_catalog() -> &'static DefaultCatalog {
    &DEFAULTS
}

fn size(id: &str, label: &str, servings: &str, base_price: f64) -> SizeEntry {
    SizeEntry {
        id: id.to_string(),
        label: label.to_string(),
        enabled: true,
        servings: servings.to_string(),
        base_price,
    }
}

fn modifier(id: &str, label: &str, price_modifier: f64) -> ModifierEntry {
    ModifierEntry {
        id: id.to_string(),
        label: label.to_string(),
        enabled: true,
        price_modifier,
    }
}

fn flat(id: &str, label: &str, price: f64) -> FlatPriceEntry {
    FlatPriceEntry {
        id: id.to_string(),
        label: label.to_string(),
        enabled: true,
        price,
    }
}

fn addon(
    id: &str,
    label: &str,
    price: f64,
    pricing_type: AddonPricing,
    min_attendees: Option<u32>,
) -> AddonEntry {
    AddonEntry {
        id: id.to_string(),
        label: label.to_string(),
        enabled: true,
        price,
        pricing_type,
        min_attendees,
    }
}

fn treat(id: &str, label: &str, unit_price: f64, min_quantity: u32, description: &str) -> TreatEntry {
    TreatEntry {
        id: id.to_string(),
        label: label.to_string(),
        enabled: true,
        unit_price,
        min_quantity,
        description: description.to_string(),
    }
}

fn build() -> DefaultCatalog {
    DefaultCatalog {
        sizes: vec![
            size("6-round", "6\" Round", "8-10", 45.0),
            size("8-round", "8\" Round", "12-16", 65.0),
            size("10-round", "10\" Round", "20-28", 90.0),
            size("12-round", "12\" Round", "30-40", 125.0),
            size("quarter-sheet", "Quarter Sheet", "20-24", 85.0),
            size("half-sheet", "Half Sheet", "40-48", 145.0),
        ],
        shapes: vec![
            modifier("round", "Round", 0.0),
            modifier("square", "Square", 10.0),
            modifier("heart", "Heart", 15.0),
            modifier("hexagon", "Hexagon", 12.0),
        ],
        flavors: vec![
            modifier("vanilla", "Vanilla", 0.0),
            modifier("chocolate", "Chocolate", 0.0),
            modifier("marble", "Marble", 3.0),
            modifier("red-velvet", "Red Velvet", 5.0),
            modifier("lemon", "Lemon", 5.0),
            modifier("carrot", "Carrot", 6.0),
        ],
        frostings: vec![
            modifier("buttercream", "Buttercream", 0.0),
            modifier("whipped-cream", "Whipped Cream", 3.0),
            modifier("cream-cheese", "Cream Cheese", 5.0),
            modifier("ganache", "Chocolate Ganache", 8.0),
            modifier("fondant", "Fondant", 15.0),
        ],
        decorations: vec![
            flat("sprinkles", "Sprinkles", 5.0),
            flat("edible-image", "Edible Image", 15.0),
            flat("custom-topper", "Custom Topper", 18.0),
            flat("gold-leaf", "Gold Leaf", 20.0),
            flat("macaron-crown", "Macaron Crown", 22.0),
            flat("fresh-flowers", "Fresh Flowers", 25.0),
        ],
        delivery_options: vec![
            flat("pickup", "Pickup", 0.0),
            flat("local", "Local Delivery (within 10 miles)", 25.0),
            flat("extended", "Extended Delivery (10-25 miles)", 45.0),
        ],
        addons: vec![
            addon("candles", "Birthday Candles", 5.0, AddonPricing::Flat, None),
            addon("cake-stand", "Cake Stand Rental", 15.0, AddonPricing::Flat, None),
            addon("extra-cupcakes", "Extra Cupcakes (per dozen)", 36.0, AddonPricing::Flat, None),
            addon(
                "dessert-bar",
                "Dessert Bar",
                8.0,
                AddonPricing::PerAttendee,
                Some(25),
            ),
            addon(
                "full-sweets-table",
                "Full Sweets Table",
                5.0,
                AddonPricing::PerAttendee,
                Some(20),
            ),
        ],
        treats: vec![
            treat("cupcakes-standard", "Classic Cupcakes", 36.0, 1, "One dozen, single flavor"),
            treat("cupcakes-gourmet", "Gourmet Cupcakes", 48.0, 1, "One dozen, filled and topped"),
            treat("cookies-decorated", "Decorated Sugar Cookies", 42.0, 1, "One dozen, royal icing"),
            treat("cake-pops", "Cake Pops", 30.0, 2, "One dozen, minimum two dozen"),
            treat("macarons", "French Macarons", 32.0, 1, "One dozen, assorted"),
            treat("brownies", "Fudge Brownies", 28.0, 1, "One dozen"),
        ],
    }
}
