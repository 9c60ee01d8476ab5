//! Filetype profiles: which files get highlighted and how.

use bitflags::bitflags;

bitflags! {
  /// Scanner features a profile turns on.
  #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
  pub struct ProfileFlags: u8 {
    const NUMBERS = 0b0000_0001;
    const STRINGS = 0b0000_0010;
  }
}

/// Immutable highlighting rules for one filetype.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Profile {
  pub name:          &'static str,
  /// Patterns starting with `.` match the filename extension exactly, all
  /// others match as a substring of the filename.
  pub file_match:    &'static [&'static str],
  pub comment_start: Option<&'static str>,
  pub flags:         ProfileFlags,
}

impl Profile {
  pub fn highlights_numbers(&self) -> bool {
    self.flags.contains(ProfileFlags::NUMBERS)
  }

  pub fn highlights_strings(&self) -> bool {
    self.flags.contains(ProfileFlags::STRINGS)
  }

  /// Whether `filename` is claimed by one of this profile's patterns.
  pub fn matches(&self, filename: &str) -> bool {
    let extension = filename.rfind('.').map(|idx| &filename[idx..]);
    self.file_match.iter().any(|pattern| {
      if pattern.starts_with('.') {
        extension == Some(*pattern)
      } else {
        filename.contains(pattern)
      }
    })
  }
}

const CODE: ProfileFlags = ProfileFlags::NUMBERS.union(ProfileFlags::STRINGS);

pub static PROFILES: &[Profile] = &[
  Profile {
    name:          "c",
    file_match:    &[".c", ".h", ".cpp", ".hpp", ".cc"],
    comment_start: Some("//"),
    flags:         CODE,
  },
  Profile {
    name:          "rust",
    file_match:    &[".rs"],
    comment_start: Some("//"),
    flags:         CODE,
  },
  Profile {
    name:          "python",
    file_match:    &[".py"],
    comment_start: Some("#"),
    flags:         CODE,
  },
  Profile {
    name:          "shell",
    file_match:    &[".sh", ".bash"],
    comment_start: Some("#"),
    flags:         CODE,
  },
  Profile {
    name:          "toml",
    file_match:    &[".toml"],
    comment_start: Some("#"),
    flags:         CODE,
  },
  Profile {
    name:          "make",
    file_match:    &["Makefile", "makefile"],
    comment_start: Some("#"),
    flags:         ProfileFlags::empty(),
  },
];

/// First profile in [`PROFILES`] claiming `filename`.
pub fn select_profile(filename: &str) -> Option<&'static Profile> {
  PROFILES.iter().find(|profile| profile.matches(filename))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn extension_match_is_exact() {
    assert_eq!(select_profile("main.c").map(|p| p.name), Some("c"));
    assert_eq!(select_profile("src/lib.rs").map(|p| p.name), Some("rust"));
    assert_eq!(select_profile("notes.cs"), None);
    assert_eq!(select_profile("archive.rs.bak"), None);
  }

  #[test]
  fn extension_uses_last_dot() {
    assert_eq!(select_profile("kilo.tar.c").map(|p| p.name), Some("c"));
    assert_eq!(select_profile("dir.c/readme"), None);
  }

  #[test]
  fn substring_match() {
    assert_eq!(select_profile("Makefile").map(|p| p.name), Some("make"));
    assert_eq!(select_profile("build/Makefile.am").map(|p| p.name), Some("make"));
  }

  #[test]
  fn no_match() {
    assert_eq!(select_profile(""), None);
    assert_eq!(select_profile("README"), None);
  }

  #[test]
  fn flags() {
    let make = select_profile("Makefile").unwrap();
    assert!(!make.highlights_numbers());
    assert!(!make.highlights_strings());
    let c = select_profile("x.h").unwrap();
    assert!(c.highlights_numbers() && c.highlights_strings());
  }
}
