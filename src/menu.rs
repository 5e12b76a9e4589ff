use std::fmt::{Debug, Display};
use std::io::{BufRead, Write};
use std::str::FromStr;
use log::debug;
use crate::avl_node::Insertion;
use crate::avl_tree::AvlTree;
use crate::error::Error;
use crate::render::render;




/**
 * A menu selection
 */
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Choice {
    Insert,
    Search,
    Print,
    Quit,
}




// ============================================================================
impl Choice {
    fn parse(line: &str) -> Option<Self> {
        match line.trim() {
            "1" => Some(Self::Insert),
            "2" => Some(Self::Search),
            "3" => Some(Self::Print),
            "0" => Some(Self::Quit),
            _ => None,
        }
    }
}




/**
 * Line-oriented interactive loop over a tree: insert a key, search for a key,
 * or print the tree, until the user quits or the input ends.
 */
pub struct Menu<R, W> {
    input: R,
    output: W,
}




// ============================================================================
impl<R: BufRead, W: Write> Menu<R, W> {

    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn run<K>(&mut self, tree: &mut AvlTree<K>) -> Result<(), Error>
    where
        K: Ord + Copy + Debug + Display + FromStr,
    {
        loop {
            self.show_menu()?;

            let line = match self.read_line()? {
                Some(line) => line,
                None => break,
            };
            let choice = match Choice::parse(&line) {
                Some(choice) => choice,
                None => {
                    writeln!(self.output, "Invalid choice")?;
                    continue;
                }
            };
            debug!("menu choice {:?}", choice);

            match choice {
                Choice::Insert => {
                    let key = match self.prompt_key("Key to insert: ")? {
                        Some(Some(key)) => key,
                        Some(None) => continue,
                        None => break,
                    };
                    match tree.insert(key)? {
                        Insertion::Inserted => writeln!(self.output, "Inserted {}", key)?,
                        Insertion::Duplicate => writeln!(self.output, "Key {} already exists", key)?,
                    }
                    write!(self.output, "{}", render(tree))?;
                }
                Choice::Search => {
                    let key: K = match self.prompt_key("Key to search: ")? {
                        Some(Some(key)) => key,
                        Some(None) => continue,
                        None => break,
                    };
                    match tree.search(&key) {
                        Some(node) => writeln!(self.output, "Found key {}", node.key())?,
                        None => writeln!(self.output, "Key not found")?,
                    }
                }
                Choice::Print => {
                    write!(self.output, "{}", render(tree))?;
                }
                Choice::Quit => break,
            }
        }
        writeln!(self.output, "Quitting")?;
        Ok(())
    }

    fn show_menu(&mut self) -> Result<(), Error> {
        writeln!(self.output)?;
        writeln!(self.output, "Menu:")?;
        writeln!(self.output, "1) Insert a key")?;
        writeln!(self.output, "2) Search for a key")?;
        writeln!(self.output, "3) Print the tree")?;
        writeln!(self.output, "0) Quit")?;
        write!(self.output, "Choice: ")?;
        self.output.flush()?;
        Ok(())
    }

    /**
     * Return the next line of input, or `None` once the input is exhausted.
     */
    fn read_line(&mut self) -> Result<Option<String>, Error> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            Ok(None)
        } else {
            Ok(Some(line))
        }
    }

    /**
     * Prompt for a key. The outer option is `None` at end of input; the inner
     * one is `None` if the line was not a valid key, which has already been
     * reported.
     */
    fn prompt_key<K: FromStr>(&mut self, prompt: &str) -> Result<Option<Option<K>>, Error> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let line = match self.read_line()? {
            Some(line) => line,
            None => return Ok(None),
        };
        match line.trim().parse() {
            Ok(key) => Ok(Some(Some(key))),
            Err(_) => {
                writeln!(self.output, "'{}' is not a valid key", line.trim())?;
                Ok(Some(None))
            }
        }
    }
}
