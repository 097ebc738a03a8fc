use arcade_physics::{
    BodyConfig, BodyHandle, BodyType, ColliderDesc, GroupHandle, OwnerId, PhysicsEvent, Vec2, World,
    WorldConfig,
};
use wasm_bindgen::prelude::*;

const WIDTH: f32 = 640.0;
const HEIGHT: f32 = 480.0;

// ---- Bouncing Boxes Demo ----

#[wasm_bindgen]
pub struct BoxesDemo {
    world: World<f32>,
    boxes: Vec<BodyHandle>,
    group: GroupHandle,
    bumps: u32,
}

#[wasm_bindgen]
impl BoxesDemo {
    #[wasm_bindgen(constructor)]
    pub fn new(count: usize) -> Result<BoxesDemo, JsError> {
        let config = WorldConfig::new()
            .with_gravity(0.0, 400.0)
            .with_bounds(0.0, 0.0, WIDTH, HEIGHT);
        let mut world = World::new(config)?;

        let group = world.create_group(BodyType::Dynamic);
        let mut boxes = Vec::with_capacity(count);
        for i in 0..count {
            let x = 20.0 + (i % 20) as f32 * 30.0;
            let y = 20.0 + (i / 20) as f32 * 30.0;
            let config = BodyConfig::new()
                .with_rect(x, y, 18.0, 18.0)
                .with_bounce(0.6, 0.6)
                .with_collide_world_bounds(true)
                .with_on_world_bounds(true);
            let body = world.create_body(OwnerId(i as u64), &config)?;
            world.set_velocity(body, Vec2::new((i % 7) as f32 * 25.0 - 75.0, 0.0))?;
            world.add_to_group(group, body)?;
            boxes.push(body);
        }
        world.add_collider(ColliderDesc::new(group, group))?;

        Ok(BoxesDemo { world, boxes, group, bumps: 0 })
    }

    pub fn update(&mut self, dt: f32) -> Result<(), JsError> {
        self.world.update(dt)?;
        for event in self.world.drain_events() {
            if let PhysicsEvent::WorldBounds { .. } = event {
                self.bumps += 1;
            }
        }
        Ok(())
    }

    /// Kick every box upward.
    pub fn shake(&mut self, strength: f32) -> Result<(), JsError> {
        for &body in &self.boxes {
            let v = self.world.body(body).map_or(Vec2::zero(), |b| b.velocity);
            self.world.set_velocity(body, Vec2::new(v.x, v.y - strength))?;
        }
        Ok(())
    }

    /// Returns flat [x0, y0, w0, h0, x1, y1, ...] box bounds
    pub fn rects(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.boxes.len() * 4);
        for &body in &self.boxes {
            if let Some(b) = self.world.body(body) {
                let r = b.bounds();
                out.extend_from_slice(&[r.x, r.y, r.width, r.height]);
            }
        }
        out
    }

    pub fn box_count(&self) -> usize {
        self.world.group(self.group).map_or(0, |g| g.len())
    }

    /// World-edge hits seen so far.
    pub fn bumps(&self) -> u32 {
        self.bumps
    }
}

// ---- Platformer Demo ----

#[wasm_bindgen]
pub struct PlatformerDemo {
    world: World<f32>,
    player: BodyHandle,
    lift: BodyHandle,
    coins: Vec<BodyHandle>,
    score: u32,
}

#[wasm_bindgen]
impl PlatformerDemo {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<PlatformerDemo, JsError> {
        let mut world = World::new(
            WorldConfig::new()
                .with_gravity(0.0, 900.0)
                .with_bounds(0.0, 0.0, WIDTH, HEIGHT),
        )?;

        let player = world.create_body(
            OwnerId(1),
            &BodyConfig::new()
                .with_rect(40.0, 300.0, 20.0, 28.0)
                .with_drag(6.0, 0.0)
                .with_max_velocity(220.0, 600.0)
                .with_collide_world_bounds(true),
        )?;
        let lift = world.create_body(
            OwnerId(2),
            &BodyConfig::new()
                .with_rect(260.0, 340.0, 96.0, 14.0)
                .with_immovable(true)
                .with_allow_gravity(false),
        )?;
        world.set_velocity(lift, Vec2::new(60.0, 0.0))?;

        let ground = world.create_group(BodyType::Static);
        for (x, y, w, h) in [(0.0, 440.0, WIDTH, 40.0), (120.0, 380.0, 100.0, 14.0), (440.0, 300.0, 140.0, 14.0)] {
            let slab = world.create_static_body(OwnerId(3), &BodyConfig::new().with_rect(x, y, w, h))?;
            world.add_to_group(ground, slab)?;
        }

        let coin_group = world.create_group(BodyType::Static);
        let mut coins = Vec::new();
        for i in 0..8 {
            let coin = world.create_static_body(
                OwnerId(100 + i),
                &BodyConfig::new().with_rect(80.0 + i as f32 * 60.0, 260.0, 10.0, 10.0),
            )?;
            world.add_to_group(coin_group, coin)?;
            coins.push(coin);
        }

        world.add_collider(ColliderDesc::new(player, ground))?;
        world.add_collider(ColliderDesc::new(player, lift))?;
        world.add_collider(ColliderDesc::overlap(player, coin_group).on_collide(|world, hit| {
            let _ = world.disable(hit.body2);
        }))?;

        Ok(PlatformerDemo { world, player, lift, coins, score: 0 })
    }

    pub fn update(&mut self, dt: f32) -> Result<(), JsError> {
        // keep the lift between its two stops
        if let Some(lift) = self.world.body(self.lift) {
            let x = lift.position().x;
            let vx = lift.velocity.x;
            if (x > 360.0 && vx > 0.0) || (x < 240.0 && vx < 0.0) {
                self.world.set_velocity(self.lift, Vec2::new(-vx, 0.0))?;
            }
        }
        self.world.update(dt)?;
        for event in self.world.drain_events() {
            if let PhysicsEvent::Overlap(_) = event {
                self.score += 1;
            }
        }
        Ok(())
    }

    /// Horizontal input in [-1, 1]; `jump` only works while standing on something.
    pub fn input(&mut self, dir: f32, jump: bool) -> Result<(), JsError> {
        let Some(body) = self.world.body(self.player) else {
            return Ok(());
        };
        let mut v = body.velocity;
        v.x = dir.clamp(-1.0, 1.0) * 220.0;
        if jump && (body.touching.down || body.blocked.down) {
            v.y = -420.0;
        }
        self.world.set_velocity(self.player, v)?;
        Ok(())
    }

    /// Returns [x, y, w, h] of the player
    pub fn player(&self) -> Vec<f32> {
        self.bounds_of(self.player)
    }

    /// Returns [x, y, w, h] of the moving lift
    pub fn lift(&self) -> Vec<f32> {
        self.bounds_of(self.lift)
    }

    /// Returns flat [x, y, ...] of coins not yet collected
    pub fn coins(&self) -> Vec<f32> {
        let mut out = Vec::new();
        for &coin in &self.coins {
            if let Some(body) = self.world.get(coin).filter(|b| b.enabled()) {
                let r = body.bounds();
                out.push(r.x);
                out.push(r.y);
            }
        }
        out
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    fn bounds_of(&self, handle: BodyHandle) -> Vec<f32> {
        match self.world.get(handle) {
            Some(body) => {
                let r = body.bounds();
                vec![r.x, r.y, r.width, r.height]
            }
            None => Vec::new(),
        }
    }
}
