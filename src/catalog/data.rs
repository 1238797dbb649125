//! Built-in footprint reference table
//!
//! Per-unit embedded water amounts in liters. Time-based habits are stored
//! per minute so extracted durations scale linearly; everything else keeps
//! its natural serving unit.

use super::{CatalogEntry, Category};

fn entry(
    key: &str,
    label: &str,
    keywords: &[&str],
    liters_per_unit: f64,
    unit: &str,
    category: Category,
) -> CatalogEntry {
    CatalogEntry {
        key: key.to_string(),
        label: label.to_string(),
        keywords: keywords.iter().map(|s| s.to_string()).collect(),
        liters_per_unit,
        unit: unit.to_string(),
        category,
    }
}

pub(super) fn builtin_entries() -> Vec<CatalogEntry> {
    use Category::*;

    vec![
        // Meat / protein (100g servings unless noted)
        entry("beef", "소고기", &["소고기"], 1540.0, "100g", Protein),
        entry("pork", "돼지고기", &["돼지고기"], 600.0, "100g", Protein),
        entry("chicken", "닭고기", &["닭고기"], 430.0, "100g", Protein),
        entry("egg", "계란", &["계란", "달걀"], 200.0, "개", Protein),
        entry("cheese", "치즈", &["치즈"], 125.0, "장", Protein),
        entry("tofu", "두부", &["두부"], 200.0, "100g", Protein),
        // Grains / carbohydrates
        entry("rice", "쌀밥", &["쌀밥", "밥"], 260.0, "공기", Grain),
        entry("bread", "식빵", &["식빵", "빵"], 40.0, "조각", Grain),
        entry("ramen", "라면", &["라면"], 550.0, "개", Grain),
        entry("hamburger", "햄버거", &["햄버거", "버거"], 2500.0, "개", Grain),
        entry("pasta", "파스타", &["파스타", "스파게티"], 185.0, "인분", Grain),
        // Fruit / vegetables
        entry("apple", "사과", &["사과"], 125.0, "개", Produce),
        entry("banana", "바나나", &["바나나"], 100.0, "개", Produce),
        entry("orange", "오렌지", &["오렌지"], 80.0, "개", Produce),
        entry("tomato", "토마토", &["토마토"], 50.0, "개", Produce),
        entry("potato", "감자", &["감자"], 25.0, "개", Produce),
        entry("lettuce", "양상추", &["양상추"], 20.0, "50g", Produce),
        // Snacks
        entry("chocolate", "초콜릿", &["초콜릿", "초코"], 1700.0, "개", Snack),
        entry("potato-chips", "감자칩", &["감자칩"], 185.0, "봉지", Snack),
        entry("nuts", "견과류", &["견과류", "아몬드"], 240.0, "줌", Snack),
        // Beverages (200ml glasses unless noted)
        entry("water", "물", &["물"], 0.2, "잔", Beverage),
        entry("milk", "우유", &["우유"], 200.0, "잔", Beverage),
        entry("coffee", "커피", &["커피"], 140.0, "잔", Beverage),
        entry("cola", "콜라", &["콜라"], 75.0, "캔", Beverage),
        entry("orange-juice", "오렌지주스", &["오렌지주스"], 200.0, "잔", Beverage),
        entry("green-tea", "녹차", &["녹차", "차"], 30.0, "잔", Beverage),
        // Clothing / goods
        entry("jeans", "청바지", &["청바지"], 10000.0, "벌", Goods),
        entry("tshirt", "티셔츠", &["티셔츠", "면티셔츠"], 2700.0, "장", Goods),
        entry("shoes", "신발", &["신발", "운동화"], 8000.0, "켤레", Goods),
        entry("paper", "종이", &["종이"], 10.0, "장", Goods),
        entry("notebook", "공책", &["공책"], 200.0, "권", Goods),
        // Daily habits
        entry("shower", "샤워", &["샤워"], 12.0, "분", Habit),
        entry("face-wash", "세수", &["세수"], 12.0, "회", Habit),
        entry("tooth-brushing", "양치", &["양치"], 6.0, "회", Habit),
        entry("hand-wash", "손 씻기", &["손씻기"], 3.0, "회", Habit),
        entry("dishwashing", "설거지", &["설거지"], 12.0, "분", Habit),
        entry("laundry", "세탁기", &["세탁기", "빨래"], 150.0, "회", Habit),
        entry("toilet", "화장실", &["화장실", "변기"], 8.0, "회", Habit),
    ]
}
