use image::imageops::{self, FilterType};
use image::DynamicImage;
use std::fmt;
use std::path::Path;

/// 縮小後の一辺のピクセル数。8x8 = 64ビットのハッシュになる。
const HASH_SIZE: u32 = 8;

/// 画像の平均ハッシュ（average hash）。
///
/// グレースケール化して 8x8 に縮小し、平均より明るいピクセルのビットを立てたものです。
/// 解像度や圧縮率が違うだけの同じ写真は、ほぼ同じハッシュになります。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AverageHash(u64);

impl AverageHash {
    /// ビット列から直接生成します。
    pub fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    pub fn bits(self) -> u64 {
        self.0
    }

    /// ファイルを開いてハッシュを計算します。
    pub fn of_path(path: &Path) -> Result<Self, image::ImageError> {
        let image = image::open(path)?;
        Ok(Self::of_image(&image))
    }

    /// デコード済みの画像からハッシュを計算します。
    pub fn of_image(image: &DynamicImage) -> Self {
        // 1. グレースケール化してから縮小する
        let gray = image.to_luma8();
        let small = imageops::resize(&gray, HASH_SIZE, HASH_SIZE, FilterType::Lanczos3);

        // 2. 平均輝度を求める
        let pixels: Vec<u8> = small.pixels().map(|p| p.0[0]).collect();
        let sum: u64 = pixels.iter().map(|&v| u64::from(v)).sum();
        let mean = sum as f64 / pixels.len() as f64;

        // 3. 平均より明るいピクセルのビットを立てる（左上が最上位ビット）
        let bits = pixels
            .iter()
            .fold(0u64, |acc, &v| (acc << 1) | u64::from(f64::from(v) > mean));
        Self(bits)
    }

    /// 2つのハッシュのハミング距離（異なるビット数）を返します。
    pub fn distance(self, other: Self) -> u32 {
        (self.0 ^ other.0).count_ones()
    }
}

impl fmt::Display for AverageHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

// --- テストモジュール ---
