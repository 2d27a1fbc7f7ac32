use simulation::{
    init, DescentPilot, FlightState, LanderState, Landing, Profile, Session, Settings, Vec2,
};

const PADS_SIM: &str = r#"{
    "Lander": { "X": 150, "Y": 0, "Fuel": 1000 },
    "Camera": { "Width": 200, "Height": 100 },
    "Terrain": [
        [0,300],
        [100,400],
        [200,400],
        [250,350],
        [300,400],
        [400,400],
        [500,300]
    ]
}"#;

fn pads_settings() -> Settings {
    init::json::parse_from_string(PADS_SIM).unwrap()
}

fn fall(session: &mut Session, max_ticks: usize) -> FlightState {
    for i in 0..max_ticks {
        let state = session
            .tick()
            .inspect_err(|e| println!("Failed on {i} tick: {e}"))
            .unwrap();
        if state.is_over() {
            return state;
        }
    }
    session.flight_state().clone()
}

#[test]
fn free_fall_onto_pad_is_too_fast() {
    let mut session = Session::new(pads_settings()).unwrap();
    let state = fall(&mut session, 1000);
    assert!(matches!(
        state,
        FlightState::Crashed(Landing::TooFastVertical { .. })
    ));
}

#[test]
fn falling_onto_slope_is_wrong_terrain() {
    let settings = Settings {
        spawn: LanderState::default().with_position(50., 0.).with_fuel(1000),
        ..pads_settings()
    };
    let mut session = Session::new(settings).unwrap();
    assert_eq!(
        fall(&mut session, 1000),
        FlightState::Crashed(Landing::WrongTerrain)
    );
}

#[test]
fn descent_pilot_lands_on_pad() {
    let mut session = Session::new(pads_settings()).unwrap();
    let state = session.run(&mut DescentPilot::default(), 10_000).unwrap();
    assert_eq!(state, FlightState::Landed);

    let lander = session.lander();
    assert!(lander.velocity().y.abs() <= 0.5);
    assert!(lander.angle().abs() <= 5.);
    assert!(!session.history().pretty_to_string().is_empty());
}

#[test]
fn lander_wraps_around_the_world() {
    let settings = Settings {
        spawn: LanderState::default()
            .with_position(490., 0.)
            .with_velocity(1., 0.),
        ..pads_settings()
    };
    let mut session = Session::new(settings).unwrap();
    for _ in 0..20 {
        assert_eq!(session.tick().unwrap(), FlightState::Flying);
    }
    assert!((session.lander().position().x - 10.).abs() < 1e-9);

    let screen = session.screen_position(session.lander().position());
    assert!((0. ..session.landscape().width()).contains(&screen.x));
}

#[test]
fn reset_after_crash() {
    let mut session = Session::new(pads_settings()).unwrap();
    fall(&mut session, 1000);
    assert!(session.flight_state().is_over());

    session.reset();
    assert_eq!(session.flight_state(), &FlightState::Flying);
    assert_eq!(session.lander().position(), Vec2::new(150., 0.));
    assert!(!fall(&mut session, 10).is_over());
}

#[test]
fn custom_terrain_must_be_valid() {
    let settings = Settings {
        terrain: Some(Profile::new(vec![Vec2::new(0., 0.), Vec2::new(-10., 0.)])),
        ..Settings::default()
    };
    assert!(Session::new(settings).is_err());
}

#[test]
fn settings_from_file() {
    let path = std::env::temp_dir().join("lunar_lander_session_run.json");
    std::fs::write(&path, PADS_SIM).unwrap();
    let session = Session::try_from_file(&path).unwrap();
    assert_eq!(session.landscape().tile_width(), 500.);
    assert_eq!(session.camera().rect.width, 200.);
    std::fs::remove_file(&path).unwrap();

    let err = Session::try_from_file("no/such/file.json").err().unwrap();
    assert!(err.starts_with("Error while reading file"));
}
