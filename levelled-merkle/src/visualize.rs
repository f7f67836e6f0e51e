use std::io::{self, Write};

use levelled_merkle_visualize::{Drawer, Visualize, visualize_stdout};

use crate::{HashEngine, LevelStore, MerkleTree};

impl<S: LevelStore, E: HashEngine> Visualize for MerkleTree<S, E> {
    fn visualize<W: Write>(&self, mut drawer: Drawer<W>) -> io::Result<Drawer<W>> {
        drawer.write(format!("merkle tree ({} leaves)", self.leaf_count()).as_bytes())?;
        for (level, store) in self.levels().iter().enumerate() {
            if store.is_empty() {
                break;
            }
            drawer.write(format!("\n==== level[{:02}] ====", level).as_bytes())?;
            drawer.down();
            for index in 0..store.len() {
                let digest = store.get(index).map_err(io::Error::other)?;
                drawer.write(format!("\n{:>4}: ", index).as_bytes())?;
                drawer = digest.visualize(drawer)?;
            }
            drawer.up();
        }
        Ok(drawer)
    }
}

impl<S: LevelStore, E: HashEngine> MerkleTree<S, E> {
    /// Dump every non-empty level to stdout, leaves first.
    pub fn print(&self) -> io::Result<()> {
        visualize_stdout(self)
    }
}
