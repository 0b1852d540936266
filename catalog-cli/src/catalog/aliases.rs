//! Header aliases per logical field
//!
//! Source sheets name their columns inconsistently. Lookup walks each list
//! in order and takes the first header that is present verbatim.

pub const CODE: &[&str] = &["Mã"];
pub const NAME: &[&str] = &["Tên SP", "Tên sản phẩm", "Name", "Tên"];
pub const PRICE: &[&str] = &["Giá sản phẩm", "Giá bán", "Giá"];
/// Snapshot exports carry the selling price under "Giá bán", sometimes next
/// to a "Giá sản phẩm" column that must not shadow it.
pub const SNAPSHOT_PRICE: &[&str] = &["Giá bán", "Giá sản phẩm", "Giá"];
pub const STOCK_HN: &[&str] = &["Tồn HN", "Tồn kho Hà Nội", "Tồn Hà Nội", "Kho HN"];
pub const STOCK_SG: &[&str] = &["Tồn SG", "Tồn kho Sài Gòn", "Tồn Sài Gòn", "Kho SG"];
pub const BRAND: &[&str] = &["Thương Hiệu", "Thương hiệu", "Brand"];
pub const CATEGORY: &[&str] = &["Ngành hàng", "Ngành Hàng", "Category"];
pub const WARRANTY: &[&str] = &[
    "BH (Tháng)",
    "BH(Tháng)",
    "Bảo hành",
    "BH",
    "Bảo hành (tháng)",
];
