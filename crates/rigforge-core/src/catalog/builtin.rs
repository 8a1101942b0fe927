//! The built-in component catalog.

use once_cell::sync::Lazy;

use super::model::Catalog;
use crate::component::{Component, ComponentCategory, Price};

static BUILTIN: Lazy<Catalog> = Lazy::new(|| Catalog::new(builtin_components()));

/// Placeholder artwork URL for a catalog entry.
pub fn placeholder_image(text: &str, color: &str) -> String {
    format!(
        "https://placehold.co/150x150/{color}/FFF?text={}",
        text.replace(' ', "+")
    )
}

pub(super) fn builtin() -> &'static Catalog {
    &BUILTIN
}

fn part(
    id: &str,
    name: &str,
    category: ComponentCategory,
    dollars: u64,
    spec_text: &str,
    image: (&str, &str),
) -> Component {
    Component::new(id, name, category, Price::from_dollars(dollars), spec_text)
        .with_image_ref(placeholder_image(image.0, image.1))
}

fn builtin_components() -> Vec<Component> {
    use ComponentCategory::*;

    vec![
        part("cpu1", "Intel Core i9-14900K", Cpu, 589, "LGA1700, 24 Cores", ("i9-14900K", "007bff")),
        part("cpu2", "Intel Core i7-14700K", Cpu, 409, "LGA1700, 20 Cores", ("i7-14700K", "007bff")),
        part("cpu3", "Intel Core i5-13600K", Cpu, 299, "LGA1700, 14 Cores", ("i5-13600K", "007bff")),
        part("cpu4", "AMD Ryzen 9 7950X3D", Cpu, 699, "AM5, 16 Cores", ("Ryzen 9", "ff5722")),
        part("cpu5", "AMD Ryzen 7 7800X3D", Cpu, 399, "AM5, 8 Cores", ("Ryzen 7", "ff5722")),
        part("gpu1", "NVIDIA RTX 4090", Gpu, 1599, "24GB GDDR6X", ("RTX 4090", "76b900")),
        part("gpu2", "NVIDIA RTX 4080 Super", Gpu, 999, "16GB GDDR6X", ("RTX 4080", "76b900")),
        part("gpu3", "NVIDIA RTX 4070 Ti", Gpu, 799, "12GB GDDR6X", ("RTX 4070", "76b900")),
        part("gpu4", "AMD Radeon RX 7900 XTX", Gpu, 999, "24GB GDDR6", ("RX 7900", "e91e63")),
        part("gpu5", "AMD Radeon RX 7800 XT", Gpu, 499, "16GB GDDR6", ("RX 7800", "e91e63")),
        part("mb1", "ASUS ROG Maximus Z790", Motherboard, 699, "LGA1700, E-ATX", ("Z790 ROG", "333")),
        part("mb2", "MSI MAG B760 Tomahawk", Motherboard, 189, "LGA1700, ATX", ("B760 MSI", "333")),
        part("mb3", "Gigabyte X670E AORUS", Motherboard, 499, "AM5, E-ATX", ("X670E", "333")),
        part("ram1", "Corsair Dominator 64GB", Ram, 289, "DDR5 6000MHz", ("DDR5 64G", "673ab7")),
        part("ram2", "G.Skill Trident Z5 32GB", Ram, 119, "DDR5 6000MHz", ("DDR5 32G", "673ab7")),
        part("ram3", "Kingston Fury 16GB", Ram, 69, "DDR4 3200MHz", ("DDR4 16G", "673ab7")),
        part("sto1", "Samsung 990 Pro 2TB", Storage, 169, "NVMe Gen5", ("SSD 2TB", "009688")),
        part("sto2", "WD Black SN850X 1TB", Storage, 99, "NVMe Gen4", ("SSD 1TB", "009688")),
        part("psu1", "Corsair RM1000x", Psu, 189, "1000W Gold", ("1000W", "ff9800")),
        part("psu2", "EVGA SuperNOVA 850W", Psu, 139, "850W Gold", ("850W", "ff9800")),
        part("case1", "NZXT H9 Flow", Case, 159, "Dual Chamber ATX", ("H9 Flow", "607d8b")),
        part("case2", "Lian Li O11 Dynamic", Case, 149, "ATX Tempered Glass", ("O11 Dyn", "607d8b")),
    ]
}
