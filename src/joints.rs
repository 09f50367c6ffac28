/// Joints offered as checkboxes on the symptom form. Stored entries are not
/// checked against this list.
pub const JOINTS: [&str; 12] = [
    "Neck",
    "Shoulder",
    "Elbow",
    "Wrist",
    "Hand",
    "Fingers",
    "Lower back",
    "Hip",
    "Knee",
    "Ankle",
    "Foot",
    "Toes",
];

/// Body part under a click on the body-map image, by vertical position in pixels.
pub fn body_part_at(y: f64) -> &'static str {
    if y < 100.0 {
        "Shoulder"
    } else if y < 200.0 {
        "Upper arm"
    } else if y < 300.0 {
        "Forearm"
    } else if y < 400.0 {
        "Thigh"
    } else {
        "Lower leg"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_map_bands() {
        assert_eq!(body_part_at(0.0), "Shoulder");
        assert_eq!(body_part_at(99.9), "Shoulder");
        assert_eq!(body_part_at(100.0), "Upper arm");
        assert_eq!(body_part_at(250.0), "Forearm");
        assert_eq!(body_part_at(399.0), "Thigh");
        assert_eq!(body_part_at(640.0), "Lower leg");
    }
}
