use crate::{CollisionChecker, LanderState, Physics, Profile, Settings, Vec2};
use json::{self, JsonValue};
use std::{fs, path::Path, time::Duration};

macro_rules! get_json {
    ($json:ident,$($key:literal),+, $func:ident) => {{
        let value = &$json$([$key])+;
        if value.is_null() {
            None
        } else {
            Some(
                value
                    .$func()
                    .ok_or(concat!("Invalid value for ", $("/", $key),+))?,
            )
        }
    }};
}

macro_rules! key {
    ($($key:literal),+) => {
        concat!($("/", $key),+)
    };
}

pub fn parse_settings<P: AsRef<Path>>(settings_file_path: P) -> Result<Settings, String> {
    let path = settings_file_path.as_ref();
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Error while reading file {}: {e}", path.display()))?;
    parse_from_string(&content)
}

pub fn parse_from_string(content: &str) -> Result<Settings, String> {
    let root = json::parse(content).map_err(|e| format!("Json error: {e}"))?;
    let defaults = Settings::default();

    Ok(Settings {
        spawn: parse_lander(&root, defaults.spawn)?,
        physics: parse_physics(&root, defaults.physics)?,
        collision_checker: parse_landing(&root, defaults.collision_checker)?,
        viewport: parse_viewport(&root, defaults.viewport)?,
        terrain: parse_terrain(&root)?,
    })
}

fn apply<T, V>(target: T, value: Option<V>, with: impl FnOnce(T, V) -> T) -> T {
    match value {
        Some(value) => with(target, value),
        None => target,
    }
}

fn positive(value: Option<f64>, key: &str) -> Result<Option<f64>, String> {
    match value {
        Some(v) if v <= 0. => Err(format!("{key} has to be positive")),
        other => Ok(other),
    }
}

fn non_negative(value: Option<f64>, key: &str) -> Result<Option<f64>, String> {
    match value {
        Some(v) if v < 0. => Err(format!("{key} can't be negative")),
        other => Ok(other),
    }
}

fn millis(value: Option<f64>) -> Option<Duration> {
    value.map(|ms| Duration::from_nanos((ms * 1e6).round() as u64))
}

fn tick_duration(value: Option<f64>, key: &str) -> Result<Option<Duration>, String> {
    match millis(positive(value, key)?) {
        Some(dt) if dt.is_zero() => Err(format!("{key} has to be positive")),
        other => Ok(other),
    }
}

fn parse_lander(root: &JsonValue, spawn: LanderState) -> Result<LanderState, String> {
    let x = get_json!(root, "Lander", "X", as_f64).unwrap_or(spawn.position.x);
    let y = get_json!(root, "Lander", "Y", as_f64).unwrap_or(spawn.position.y);
    let vx = get_json!(root, "Lander", "HSpeed", as_f64).unwrap_or(spawn.velocity.x);
    let vy = get_json!(root, "Lander", "VSpeed", as_f64).unwrap_or(spawn.velocity.y);
    let spawn = apply(spawn, get_json!(root, "Lander", "Fuel", as_u32), LanderState::with_fuel);
    let spawn = apply(spawn, get_json!(root, "Lander", "Angle", as_f64), LanderState::with_angle);
    Ok(spawn.with_position(x, y).with_velocity(vx, vy))
}

fn parse_physics(root: &JsonValue, physics: Physics) -> Result<Physics, String> {
    let physics = apply(
        physics,
        get_json!(root, "Physics", "Gravity", as_f64),
        Physics::with_g,
    );
    let physics = apply(
        physics,
        get_json!(root, "Physics", "ThrustPower", as_f64),
        Physics::with_thrust_power,
    );
    let physics = apply(
        physics,
        get_json!(root, "Physics", "RotationStep", as_f64),
        Physics::with_angle_step,
    );
    let physics = apply(
        physics,
        non_negative(
            get_json!(root, "Physics", "AngleLimit", as_f64),
            key!("Physics", "AngleLimit"),
        )?,
        Physics::with_angle_limit,
    );
    let physics = apply(
        physics,
        positive(
            get_json!(root, "Physics", "RotationSpeed", as_f64),
            key!("Physics", "RotationSpeed"),
        )?,
        Physics::with_rotation_speed,
    );
    let physics = apply(
        physics,
        millis(non_negative(
            get_json!(root, "Physics", "RotationDelayMs", as_f64),
            key!("Physics", "RotationDelayMs"),
        )?),
        Physics::with_rotation_delay,
    );
    Ok(apply(
        physics,
        tick_duration(
            get_json!(root, "Physics", "TickMs", as_f64),
            key!("Physics", "TickMs"),
        )?,
        Physics::with_dt,
    ))
}

fn parse_landing(root: &JsonValue, checker: CollisionChecker) -> Result<CollisionChecker, String> {
    let checker = apply(
        checker,
        positive(
            get_json!(root, "Landing", "Size", as_f64),
            key!("Landing", "Size"),
        )?,
        CollisionChecker::with_half_extent,
    );
    let checker = apply(
        checker,
        non_negative(
            get_json!(root, "Landing", "MaxAngle", as_f64),
            key!("Landing", "MaxAngle"),
        )?,
        CollisionChecker::with_max_angle,
    );
    let checker = apply(
        checker,
        positive(
            get_json!(root, "Landing", "MaxHSpeed", as_f64),
            key!("Landing", "MaxHSpeed"),
        )?,
        CollisionChecker::with_max_horizontal_speed,
    );
    Ok(apply(
        checker,
        positive(
            get_json!(root, "Landing", "MaxVSpeed", as_f64),
            key!("Landing", "MaxVSpeed"),
        )?,
        CollisionChecker::with_max_vertical_speed,
    ))
}

fn parse_viewport(root: &JsonValue, (width, height): (f64, f64)) -> Result<(f64, f64), String> {
    let width = positive(
        get_json!(root, "Camera", "Width", as_f64),
        key!("Camera", "Width"),
    )?
    .unwrap_or(width);
    let height = positive(
        get_json!(root, "Camera", "Height", as_f64),
        key!("Camera", "Height"),
    )?
    .unwrap_or(height);
    Ok((width, height))
}

fn parse_terrain(root: &JsonValue) -> Result<Option<Profile>, String> {
    let terrain_array = &root["Terrain"];
    if terrain_array.is_null() {
        return Ok(None);
    }
    if !terrain_array.is_array() {
        return Err("Terrain has to be an array of [x, y] points".to_owned());
    }

    let points = terrain_array
        .members()
        .map(|point_json| -> Result<Vec2, String> {
            let err_str = "Terrain has to contain numeric landpoints";
            let x = point_json[0].as_f64().ok_or(err_str)?;
            let y = point_json[1].as_f64().ok_or(err_str)?;
            Ok(Vec2::new(x, y))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let profile = Profile::new(points);
    let profile = apply(
        profile,
        positive(get_json!(root, "Landscale", as_f64), key!("Landscale"))?,
        Profile::with_landscale,
    );
    Ok(Some(apply(
        profile,
        get_json!(root, "BaseOffset", as_f64),
        Profile::with_base_offset,
    )))
}
