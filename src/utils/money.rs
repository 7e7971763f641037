/// 四捨五入到兩位小數 (round half away from zero)
pub fn round2(value: f64) -> f64 {
    let rounded = (value * 100.0).round() / 100.0;
    // 避免輸出 -0.0
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}
