use crate::simulation::{LanderState, Vec2};

/// Per-tick telemetry of one flight.
#[derive(Clone, Debug, Default)]
pub struct LanderHistory {
    x: Vec<f64>,
    y: Vec<f64>,
    vx: Vec<f64>,
    vy: Vec<f64>,
    fuel: Vec<u32>,
    angle: Vec<f64>,
}

impl LanderHistory {
    pub fn with_initial_state(state: &LanderState) -> Self {
        let mut history = Self::default();
        history.append_lander_state(state);
        history
    }

    pub fn append_lander_state(&mut self, state: &LanderState) {
        self.x.push(state.position.x);
        self.y.push(state.position.y);
        self.vx.push(state.velocity.x);
        self.vy.push(state.velocity.y);
        self.fuel.push(state.fuel);
        self.angle.push(state.angle);
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn last(&self) -> Option<LanderState> {
        self.iter_history().last()
    }

    pub fn iter_history(&self) -> impl Iterator<Item = LanderState> + '_ {
        self.x
            .iter()
            .zip(&self.y)
            .zip(&self.vx)
            .zip(&self.vy)
            .zip(&self.fuel)
            .zip(&self.angle)
            .map(|(((((x, y), vx), vy), fuel), angle)| LanderState {
                position: Vec2::new(*x, *y),
                velocity: Vec2::new(*vx, *vy),
                fuel: *fuel,
                angle: *angle,
            })
    }

    pub fn pretty_to_string(&self) -> String {
        self.iter_history().fold(
            format!(
                "{:>9}{:>9}{:>9}{:>9}{:>7}{:>9}",
                "X", "Y", "VX", "VY", "FUEL", "ANGLE"
            ),
            |out,
             LanderState {
                 position,
                 velocity,
                 fuel,
                 angle,
             }| {
                out + &format!(
                    "\n{:9.2}{:9.2}{:9.3}{:9.3}{fuel:7}{angle:9.2}",
                    position.x, position.y, velocity.x, velocity.y
                )
            },
        )
    }
}

#[cfg(test)]
mod history_tests {
    use super::*;

    #[test]
    fn records_states_in_order() {
        let first = LanderState::default().with_position(1., 2.).with_fuel(10);
        let second = first.clone().with_velocity(0.5, -0.5).with_fuel(9);
        let mut history = LanderHistory::with_initial_state(&first);
        history.append_lander_state(&second);

        assert_eq!(history.len(), 2);
        assert_eq!(history.iter_history().collect::<Vec<_>>(), vec![first, second.clone()]);
        assert_eq!(history.last(), Some(second));
    }

    #[test]
    fn pretty_table() {
        let history = LanderHistory::with_initial_state(
            &LanderState::default()
                .with_position(150., 20.)
                .with_fuel(1000)
                .with_angle(-15.),
        );
        let table = history.pretty_to_string();
        let mut lines = table.lines();
        assert!(lines.next().unwrap().contains("FUEL"));
        let row = lines.next().unwrap();
        assert!(row.contains("150.00"));
        assert!(row.contains("1000"));
        assert!(row.contains("-15.00"));
        assert!(lines.next().is_none());
    }
}
