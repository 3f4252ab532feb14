use crate::audio::commands::{EngineCommand, TrackRef};

/// Opaque audio output. Implementations report back through identity-tagged
/// [`EngineEvent`](crate::event::events::EngineEvent)s on the owner loop's channel.
pub trait PlaybackEngine: Send {
    fn load(&mut self, track: &TrackRef);
    fn prepare(&mut self);
    fn play(&mut self);
    fn pause(&mut self);
    fn stop(&mut self);
    fn clear_media_items(&mut self);
    fn release(&mut self) {}

    fn execute(&mut self, cmd: EngineCommand) {
        match cmd {
            EngineCommand::Load(track) => self.load(&track),
            EngineCommand::Prepare => self.prepare(),
            EngineCommand::Play => self.play(),
            EngineCommand::Pause => self.pause(),
            EngineCommand::Stop => self.stop(),
            EngineCommand::ClearMediaItems => self.clear_media_items(),
            EngineCommand::Release => self.release(),
        }
    }
}
