/// Size formatting for listing rows.
///
/// Binary scaling (1 KB = 1024 B), at most two decimals, trailing zeros
/// dropped: `1536` is `1.5 KB`, `1048576` is `1 MB`.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

    if bytes == 0 {
        return "0 B".to_owned();
    }
    let exp = (bytes.ilog(1024) as usize).min(UNITS.len() - 1);
    let scaled = bytes as f64 / 1024f64.powi(exp as i32);
    let rounded = (scaled * 100.0).round() / 100.0;
    // `f64` Display prints the shortest form, so `1.50` is `1.5` and `1.00` is `1`.
    format!("{rounded} {}", UNITS[exp])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size_bytes() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(1), "1 B");
        assert_eq!(format_size(1023), "1023 B");
    }

    #[test]
    fn test_format_size_kb() {
        assert_eq!(format_size(1024), "1 KB");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(1234), "1.21 KB");
    }

    #[test]
    fn test_format_size_mb() {
        assert_eq!(format_size(1_048_576), "1 MB");
        assert_eq!(format_size(5 * 1_048_576 + 262_144), "5.25 MB");
    }

    #[test]
    fn test_format_size_gb_tb() {
        assert_eq!(format_size(1_073_741_824), "1 GB");
        assert_eq!(format_size(1_099_511_627_776), "1 TB");
    }

    #[test]
    fn test_format_size_caps_at_tb() {
        assert_eq!(format_size(2048 * 1_099_511_627_776), "2048 TB");
    }
}
