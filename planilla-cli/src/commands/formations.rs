//! Formations command - list the formation catalog

use planilla_core::Formation;

pub fn execute() {
    for formation in Formation::ALL {
        println!("{}", render_formation(formation));
    }
}

fn render_formation(formation: Formation) -> String {
    let coords: Vec<String> = formation
        .slots()
        .iter()
        .map(|p| format!("({},{})", p.x_pct, p.y_pct_from_baseline))
        .collect();
    format!("{:<8} {}", formation.name(), coords.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_formation() {
        let line = render_formation(Formation::F442);
        assert!(line.starts_with("4-4-2"));
        assert!(line.contains("(50,10) (15,30)"));
        assert!(line.ends_with("(65,85)"));
    }
}
