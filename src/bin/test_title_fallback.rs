use anyhow::Result;
use listing_normalizer::processor::title_extractor::{
    extract_title_attributes, format_memory, format_refresh_rate, format_storage,
};
use listing_normalizer::{RawRecord, RuleNormalizer};

fn main() -> Result<()> {
    println!("=== TESTING TITLE FALLBACK EXTRACTION ===\n");

    let titles = [
        "Lenovo LOQ Intel Core i7 13650HX 16GB 1TB SSD RTX4060 15.6\" FHD 144Hz Windows 11",
        "i5 512GB SSD 16GB RAM",
        "Apple MacBook Air M2 8GB 256GB SSD 13.6\" Liquid Retina",
        "Asus Zenbook 14 OLED Core Ultra 7 155H 32GB 1TB SSD 2880x1800 120Hz",
        "HP Victus 15-fb2063nt Ryzen 5 8645HS 16GB 512GB SSD RTX 4050 144Hz FreeDOS",
        "Casper Nirvana X600 Intel Celeron N4020 4GB 128GB SSD 15.6\" HD",
        "Msi Thin 15 B13UC 16GB 1.5TB SSD",
    ];

    for title in titles {
        let attrs = extract_title_attributes(title);
        println!("📝 {}", title);
        println!(
            "   Memory:  {}",
            attrs.memory_gb.map(format_memory).unwrap_or_else(|| "-".to_string())
        );
        println!(
            "   Storage: {}",
            attrs.storage_gb.map(format_storage).unwrap_or_else(|| "-".to_string())
        );
        println!(
            "   Refresh: {}",
            attrs.refresh_hz.map(format_refresh_rate).unwrap_or_else(|| "-".to_string())
        );
        println!("   Display: {}\n", attrs.display_feature.unwrap_or("-"));
    }

    println!("=== MERGE INTO A LISTING WITH GAPS ===\n");

    let normalizer = RuleNormalizer::new();
    let record = RawRecord::new()
        .with("Başlık", titles[1])
        .with("Ram (Sistem Belleği)", "Belirtilmemiş")
        .with("SSD Kapasitesi", "-")
        .with("Marka", "Lenovo");

    let canonical = normalizer.normalize_record(&record);
    println!("{}", serde_json::to_string_pretty(&canonical)?);

    println!("\n✅ Title fallback check complete");
    Ok(())
}
