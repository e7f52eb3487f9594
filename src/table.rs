use image::{Rgb, RgbImage, imageops};

use crate::{compose::TARGET_DIMENSION, font::TableFont};

/// Height of the card canvas; the hero occupies the top square.
pub const CARD_HEIGHT: u32 = 1000;

/// Table box, inclusive pixel bounds on both axes.
pub const TABLE_X: i32 = 50;
pub const TABLE_Y: i32 = 820;
pub const TABLE_WIDTH: i32 = 700;
pub const TABLE_HEIGHT: i32 = 120;

/// Height of each of the three table rows.
pub const ROW_HEIGHT: i32 = 40;

/// Width of the narrow label column.
pub const LABEL_COLUMN_WIDTH: i32 = 80;

const LABEL_INSET: i32 = 20;
const VALUE_INSET: i32 = 100;

const TABLE_FILL: Rgb<u8> = Rgb([204, 229, 255]);
const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

/// Compose the catalog card: the hero canvas pasted at the top, the metadata
/// table in the band below it. The hero buffer is copied, never mutated.
///
/// Row order top to bottom is fixed: brand, name, model.
pub fn render_card(
    hero: &RgbImage,
    font: &TableFont,
    brand: &str,
    name: &str,
    model: &str,
) -> RgbImage {
    let mut card = RgbImage::from_pixel(TARGET_DIMENSION, CARD_HEIGHT, WHITE);
    imageops::replace(&mut card, hero, 0, 0);

    let (x0, y0) = (TABLE_X, TABLE_Y);
    let (x1, y1) = (TABLE_X + TABLE_WIDTH, TABLE_Y + TABLE_HEIGHT);

    fill_rect(&mut card, x0, y0, x1, y1, TABLE_FILL);
    stroke_rect(&mut card, x0, y0, x1, y1, BLACK);
    hline(&mut card, x0, x1, y0 + ROW_HEIGHT, BLACK);
    hline(&mut card, x0, x1, y0 + 2 * ROW_HEIGHT, BLACK);
    vline(&mut card, x0 + LABEL_COLUMN_WIDTH, y0, y1, BLACK);

    let rows = [("品牌", brand), ("名称", name), ("型号", model)];
    for (i, (label, value)) in rows.iter().enumerate() {
        let row_top = y0 + i as i32 * ROW_HEIGHT;
        font.draw_text(&mut card, x0 + LABEL_INSET, row_top, ROW_HEIGHT as u32, BLACK, label);
        font.draw_text(&mut card, x0 + VALUE_INSET, row_top, ROW_HEIGHT as u32, BLACK, value);
    }

    card
}

fn put(img: &mut RgbImage, x: i32, y: i32, color: Rgb<u8>) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as u32, y as u32);
    if x < img.width() && y < img.height() {
        img.put_pixel(x, y, color);
    }
}

fn fill_rect(img: &mut RgbImage, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgb<u8>) {
    for y in y0..=y1 {
        for x in x0..=x1 {
            put(img, x, y, color);
        }
    }
}

fn stroke_rect(img: &mut RgbImage, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgb<u8>) {
    hline(img, x0, x1, y0, color);
    hline(img, x0, x1, y1, color);
    vline(img, x0, y0, y1, color);
    vline(img, x1, y0, y1, color);
}

fn hline(img: &mut RgbImage, x0: i32, x1: i32, y: i32, color: Rgb<u8>) {
    for x in x0..=x1 {
        put(img, x, y, color);
    }
}

fn vline(img: &mut RgbImage, x: i32, y0: i32, y1: i32, color: Rgb<u8>) {
    for y in y0..=y1 {
        put(img, x, y, color);
    }
}
