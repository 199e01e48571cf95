// Lexora – A word game
// Copyright (C) 2024  The Lexora developers
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

/// Countdown driven only by explicit ticks. Nothing here looks at
/// the wall clock, so ticks missed while the host was suspended are
/// simply lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionClock {
    time_limit: u32,
    remaining: u32,
}

impl SessionClock {
    pub fn new(time_limit: u32) -> SessionClock {
        SessionClock {
            time_limit,
            remaining: time_limit,
        }
    }

    pub fn tick(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }

    pub fn is_expired(&self) -> bool {
        self.remaining == 0
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn time_limit(&self) -> u32 {
        self.time_limit
    }

    pub fn elapsed(&self) -> u32 {
        self.time_limit - self.remaining
    }
}

/// Formats a number of seconds as `MM:SS`.
pub fn format_time(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn countdown() {
        let mut clock = SessionClock::new(3);

        assert_eq!(clock.remaining(), 3);
        assert!(!clock.is_expired());

        clock.tick();
        clock.tick();
        assert_eq!(clock.remaining(), 1);
        assert_eq!(clock.elapsed(), 2);
        assert!(!clock.is_expired());

        clock.tick();
        assert!(clock.is_expired());

        for _ in 0..5 {
            clock.tick();
            assert_eq!(clock.remaining(), 0);
            assert!(clock.is_expired());
        }

        assert_eq!(clock.elapsed(), clock.time_limit());
    }

    #[test]
    fn format() {
        assert_eq!(&format_time(0), "00:00");
        assert_eq!(&format_time(30), "00:30");
        assert_eq!(&format_time(150), "02:30");
        assert_eq!(&format_time(3600), "60:00");
    }
}
