use ratatui::layout::Rect;

/// Place a `width`×`height` popup under `anchor`, flipping above it when
/// there is not enough room below, and keep it inside `bounds`.
pub fn anchored_rect(bounds: Rect, anchor: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(bounds.width);
    let height = height.min(bounds.height);

    let below = bounds.bottom().saturating_sub(anchor.bottom());
    let above = anchor.y.saturating_sub(bounds.y);
    let y = if below >= height {
        anchor.bottom()
    } else if above >= height {
        anchor.y - height
    } else {
        bounds.bottom().saturating_sub(height)
    };

    let max_x = bounds.right().saturating_sub(width);
    let x = anchor.x.clamp(bounds.x, max_x.max(bounds.x));
    Rect::new(x, y, width, height)
}

/// Split `area` into consecutive rows of `height`, dropping any partial row.
pub fn stack_rows(area: Rect, height: u16, count: usize) -> Vec<Rect> {
    if height == 0 {
        return Vec::new();
    }
    let fit = (area.height / height) as usize;
    (0..count.min(fit))
        .map(|row| Rect::new(area.x, area.y + row as u16 * height, area.width, height))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn popup_opens_below_anchor_when_room() {
        let bounds = Rect::new(0, 0, 80, 24);
        let anchor = Rect::new(4, 2, 30, 3);
        assert_eq!(anchored_rect(bounds, anchor, 20, 10), Rect::new(4, 5, 20, 10));
    }

    #[test]
    fn popup_flips_above_near_bottom() {
        let bounds = Rect::new(0, 0, 80, 24);
        let anchor = Rect::new(4, 18, 30, 3);
        assert_eq!(anchored_rect(bounds, anchor, 20, 10), Rect::new(4, 8, 20, 10));
    }

    #[test]
    fn popup_is_shifted_left_to_stay_on_screen() {
        let bounds = Rect::new(0, 0, 40, 24);
        let anchor = Rect::new(30, 2, 10, 3);
        let area = anchored_rect(bounds, anchor, 20, 5);
        assert_eq!(area.x, 20);
        assert!(area.right() <= bounds.right());
    }

    #[test]
    fn stack_rows_drops_partial_rows() {
        let rows = stack_rows(Rect::new(0, 0, 10, 12), 5, 4);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], Rect::new(0, 5, 10, 5));
    }
}
