use std::collections::HashMap;

use crate::models::Field;
use crate::processor::text::normalize_text;

/// What a raw column feeds into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnRole {
    /// Free-text listing title, input to the title fallback.
    Title,
    Attribute(Field),
}

/// Routes raw column names to fields.
pub struct FieldClassifier {
    field_mappings: HashMap<String, ColumnRole>,
}

impl FieldClassifier {
    pub fn new() -> Self {
        let mut classifier = FieldClassifier {
            field_mappings: HashMap::new(),
        };

        // Canonical names; these also cover snake_case ids like "ram_size"
        for field in Field::ALL {
            classifier.add_field_mapping(field.name(), ColumnRole::Attribute(field));
        }

        for title in ["Title", "Başlık", "Baslik", "Name", "Product name", "Ürün Adı"] {
            classifier.add_field_mapping(title, ColumnRole::Title);
        }

        // Marketplace attribute table headers
        let headers: &[(&str, Field)] = &[
            ("İşlemci Nesli", Field::CpuGeneration),
            ("İşlemci Çekirdek Sayısı", Field::CoreCount),
            ("Çekirdek Sayısı", Field::CoreCount),
            ("Maksimum İşlemci Hızı (GHz)", Field::MaxCpuFrequency),
            ("Maksimum İşlemci Hızı", Field::MaxCpuFrequency),
            ("Ram (Sistem Belleği)", Field::RamSize),
            ("Ram", Field::RamSize),
            ("Ekran Kartı Hafızası", Field::GpuMemory),
            ("SSD Kapasitesi", Field::SsdCapacity),
            ("Harddisk Kapasitesi", Field::HddCapacity),
            ("Hard Disk Kapasitesi", Field::HddCapacity),
            ("Ekran Boyutu", Field::ScreenSize),
            ("Ekran Yenileme Hızı", Field::RefreshRate),
            ("Fiyat (TRY)", Field::Price),
            ("Fiyat", Field::Price),
            ("Marka", Field::Brand),
            ("Kullanım Amacı", Field::IntendedUse),
            ("Renk", Field::Color),
            ("Colour", Field::Color),
            ("Cihaz Ağırlığı", Field::Weight),
            ("Ağırlık", Field::Weight),
            ("İşlemci Tipi", Field::CpuFamily),
            ("Ram Tipi", Field::RamType),
            ("Ram (Sistem Belleği) Tipi", Field::RamType),
            ("Ekran Kartı", Field::GpuModel),
            ("Ekran Kartı Tipi", Field::GpuType),
            ("Ekran Kartı Bellek Tipi", Field::GpuVramType),
            ("Max Ekran Çözünürlüğü", Field::Resolution),
            ("Çözünürlük", Field::Resolution),
            ("Çözünürlük Standartı", Field::DisplayStandard),
            ("Ekran Panel Tipi", Field::PanelType),
            ("Panel Tipi", Field::PanelType),
            ("İşletim Sistemi", Field::OperatingSystem),
        ];
        for (header, field) in headers {
            classifier.add_field_mapping(header, ColumnRole::Attribute(*field));
        }

        classifier
    }

    pub fn classify_field(&self, field_name: &str) -> Option<ColumnRole> {
        self.field_mappings
            .get(&normalize_field_name(field_name))
            .copied()
    }

    pub fn add_field_mapping(&mut self, from: &str, role: ColumnRole) {
        self.field_mappings.insert(normalize_field_name(from), role);
    }

    pub fn is_title_column(&self, field_name: &str) -> bool {
        self.classify_field(field_name) == Some(ColumnRole::Title)
    }
}

impl Default for FieldClassifier {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize_field_name(name: &str) -> String {
    normalize_text(name)
        .replace('ı', "i")
        .replace(['_', '-', ' '], "")
}
