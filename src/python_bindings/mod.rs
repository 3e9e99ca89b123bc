//! Provides tools and interfaces to integrate the crate's functionality with Python.

use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::automaton::Automaton;
use crate::config::Config;
use crate::state::StateId;

/// Python markers are plain integers chosen by the caller, e.g. rule ids.
type PyMarker = u64;

#[pyclass(name = "Automaton", module = "subset_dfa.subset_dfa_rs")]
#[derive(Clone, Debug, PartialEq)]
pub struct PyAutomaton(Automaton<PyMarker>);

impl PyAutomaton {
    fn check_node(&self, node: StateId) -> PyResult<()> {
        self.0.try_node(node)?;
        Ok(())
    }
}

#[pymethods]
impl PyAutomaton {
    #[new]
    fn __new__() -> Self {
        PyAutomaton(Automaton::new())
    }

    fn add_node(&mut self) -> StateId {
        self.0.add_node()
    }

    /// Add an edge; without `ranges` it is an epsilon edge.
    #[pyo3(signature = (src, dest, ranges=None))]
    fn add_edge(
        &mut self,
        src: StateId,
        dest: StateId,
        ranges: Option<Vec<(u32, u32)>>,
    ) -> PyResult<()> {
        self.check_node(src)?;
        self.check_node(dest)?;
        let edge = self.0.add_edge(src, dest);
        if let Some(ranges) = ranges {
            let class = edge.class_mut();
            for (lo, hi) in ranges {
                class.add(lo, hi);
            }
        }
        Ok(())
    }

    fn add_final(&mut self, node: StateId, marker: PyMarker) -> PyResult<()> {
        self.check_node(node)?;
        self.0.add_final(node, marker);
        Ok(())
    }

    #[pyo3(signature = (state_limit=None))]
    fn to_dfa(&mut self, py: Python<'_>, state_limit: Option<usize>) -> PyResult<()> {
        let config = Config::new().state_limit(state_limit);
        let automaton = &mut self.0;
        py.allow_threads(|| automaton.to_dfa_with(&config))
            .map_err(Into::into)
    }

    fn num_nodes(&self) -> usize {
        self.0.len()
    }

    fn edges(&self, node: StateId) -> PyResult<Vec<(StateId, Option<Vec<(u32, u32)>>)>> {
        let node = self.0.try_node(node)?;
        Ok(node
            .edges()
            .iter()
            .map(|e| (e.dest(), e.class().map(|c| c.intervals().collect())))
            .collect())
    }

    fn finals(&self, node: StateId) -> PyResult<Vec<PyMarker>> {
        Ok(self.0.try_node(node)?.finals().to_vec())
    }

    fn is_deterministic(&self) -> bool {
        self.0.is_deterministic()
    }

    fn __repr__(&self) -> String {
        format!("{:#?}", self.0)
    }

    fn __str__(&self) -> String {
        format!("{}", self.0)
    }

    fn __eq__(&self, other: &PyAutomaton) -> bool {
        self.0 == other.0
    }

    fn __deepcopy__(&self, _py: Python<'_>, _memo: Py<PyDict>) -> Self {
        self.clone()
    }

    fn __reduce__(&self) -> PyResult<(PyObject, (Vec<u8>,))> {
        Python::with_gil(|py| {
            let cls = PyModule::import(py, "subset_dfa.subset_dfa_rs")?.getattr("Automaton")?;
            let binary_data: Vec<u8> = self.0.to_bytes()?;
            Ok((cls.getattr("from_binary")?.unbind(), (binary_data,)))
        })
    }

    #[staticmethod]
    fn from_binary(binary_data: Vec<u8>) -> PyResult<Self> {
        Ok(PyAutomaton(Automaton::from_bytes(&binary_data[..])?))
    }
}

#[pymodule]
fn subset_dfa_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyAutomaton>()?;

    Ok(())
}
