#[cfg(test)]
pub const POST_BODY: &str = r#"Rust makes **ownership** explicit.

```rust
fn main() {
    println!("**not bold**");
}
```

![[borrow.png]]

Read [the book](https://doc.rust-lang.org/book/) and call `cargo build`.

Unclosed **markers and `ticks stay as they are."#;

#[cfg(test)]
pub const POST_DATA: &str = r#"Why the borrow checker is your friend.
---
2024-03-01 | rust, ownership
---
Rust makes **ownership** explicit.

```rust
fn main() {
    println!("**not bold**");
}
```

![[borrow.png]]

Read [the book](https://doc.rust-lang.org/book/) and call `cargo build`.

Unclosed **markers and `ticks stay as they are.
"#;

#[cfg(test)]
pub const POST_DATA_MALFORMED: &str = r#"A summary without a body
---
2024-03-02
"#;
