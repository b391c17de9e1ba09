//! End-to-end tests for the IMF parser
//!
//! Builds IMF files line by line in the layout observatories publish and
//! checks the assembled channels.


/// Header line of an hourly block, also used as the marker between blocks
pub fn header_line(station: &str, date: &str, hour: u32) -> String {
    format!(
        "{:<3} {} {:03} {:02} HDZF R GIN 06840198 000000 RRRRRRRRRRRR",
        station, date, 1, hour
    )
}

/// Data line carrying two samples, fields zero-padded to seven characters
pub fn data_line(values: [i32; 8]) -> String {
    let fields: Vec<String> = values.iter().map(|v| format!("{:07}", v)).collect();
    format!("{}  {}", fields[..4].join(" "), fields[4..].join(" "))
}

/// Join lines into file text with a trailing newline
pub fn file_text(lines: &[String]) -> String {
    let mut text = lines.join("\n");
    text.push('\n');
    text
}
